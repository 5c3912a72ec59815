//! Directive application and HTML assembly.
//!
//! Rendering never builds a tree. Instead each token slot accumulates the
//! markup of every directive that opens or closes there:
//!
//! 1. Token directives rewrite every token, in reverse declaration order.
//! 2. Elements are grouped by span length and processed shortest first, so an
//!    element nested inside another has already written its tags into the
//!    shared slots when the outer element wraps around them. Within a group,
//!    element directives apply in reverse declaration order.
//! 3. Slots are joined and wrapped in `<div class="htmlvis {format}">`.

use std::collections::BTreeMap;

use crate::directive::Directive;
use crate::sgml::{AnnotatedText, Element, Token};

/// CSS class carried by every rendered wrapper.
pub const WRAPPER_CLASS: &str = "htmlvis";

/// Renders parsed documents for one visualization format.
///
/// # Example
///
/// ```
/// use htmlvis::{Renderer, directive::parse_config, sgml::parse_annotations};
///
/// let directives = parse_config("tok\tspan").unwrap();
/// let text = parse_annotations("hi\nbye").unwrap();
/// let html = Renderer::new("plain").render(text, &directives);
/// assert_eq!(html, r#"<div class="htmlvis plain"><span>hi</span><span>bye</span></div>"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    format: String,
    separator: String,
}

impl Renderer {
    /// Create a renderer whose wrapper carries `format` as a CSS class.
    #[must_use]
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            separator: String::new(),
        }
    }

    /// Join token slots with `separator` instead of the empty string.
    ///
    /// `"<!--\n-->"` keeps output lines short without adding whitespace
    /// between tokens.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Render a parsed document.
    #[must_use]
    pub fn render(&self, text: AnnotatedText, directives: &[Directive]) -> String {
        self.render_parts(text.tokens, &text.elements, directives)
    }

    /// Render tokens and elements produced separately.
    #[must_use]
    pub fn render_parts(
        &self,
        mut tokens: Vec<Token>,
        elements: &[Element],
        directives: &[Directive],
    ) -> String {
        apply_token_directives(&mut tokens, directives);
        apply_element_directives(&mut tokens, elements, directives);
        self.assemble(&tokens)
    }

    fn assemble(&self, tokens: &[Token]) -> String {
        let body = tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(&self.separator);

        if self.format.is_empty() {
            format!(r#"<div class="{WRAPPER_CLASS}">{body}</div>"#)
        } else {
            format!(r#"<div class="{WRAPPER_CLASS} {}">{body}</div>"#, self.format)
        }
    }
}

/// Render with the default empty separator.
#[must_use]
pub fn render_html(
    tokens: Vec<Token>,
    elements: &[Element],
    directives: &[Directive],
    format: &str,
) -> String {
    Renderer::new(format).render_parts(tokens, elements, directives)
}

/// Append a `<style>` block after rendered HTML, if `css` is non-empty.
pub fn append_stylesheet(html: &mut String, css: &str) {
    if css.trim().is_empty() {
        return;
    }
    html.push_str("<style>");
    html.push_str(css);
    html.push_str("</style>");
}

/// Pass 1. Without any token directive, token text is suppressed entirely.
fn apply_token_directives(tokens: &mut [Token], directives: &[Directive]) {
    let token_directives: Vec<&Directive> = directives
        .iter()
        .filter(|d| d.trigger().is_token())
        .rev()
        .collect();

    if token_directives.is_empty() {
        for token in tokens.iter_mut() {
            token.text.clear();
        }
        return;
    }

    for directive in token_directives {
        for token in tokens.iter_mut() {
            let opened = directive.open_token(&token.text);
            token.text = directive.close_transform(&opened);
        }
    }
}

/// Pass 2, shortest spans first.
fn apply_element_directives(tokens: &mut [Token], elements: &[Element], directives: &[Directive]) {
    let element_directives: Vec<&Directive> = directives
        .iter()
        .filter(|d| !d.trigger().is_token())
        .rev()
        .collect();
    if element_directives.is_empty() {
        return;
    }

    let mut by_len: BTreeMap<usize, Vec<&Element>> = BTreeMap::new();
    for element in elements {
        if element.open > element.close || element.close >= tokens.len() {
            tracing::warn!(
                element = %element.name,
                open = element.open,
                close = element.close,
                tokens = tokens.len(),
                "Skipping element outside the token range"
            );
            continue;
        }
        by_len.entry(element.span_len()).or_default().push(element);
    }

    for partition in by_len.values() {
        for directive in &element_directives {
            for element in partition {
                let Some(attr) = directive.trigger().matched_attr(element) else {
                    continue;
                };
                let opened = directive.open_matched(element, attr, &tokens[element.open].text);
                tokens[element.open].text = opened;
                let closed = directive.close_transform(&tokens[element.close].text);
                tokens[element.close].text = closed;
            }
        }
    }
}
