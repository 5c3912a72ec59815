//! Htmlvis configuration directives.
//!
//! A configuration is an ordered list of [`Directive`]s, one per line. Each
//! directive has three parts:
//!
//! - a [`Trigger`] selecting what it applies to (tokens, elements by name, by
//!   attribute value, or by name and value);
//! - a [`GeneratedElement`] describing the tag to wrap around the target;
//! - a [`Content`] inserted after the opening tag.
//!
//! # Example
//!
//! ```
//! use htmlvis::directive::{parse_config, Trigger};
//!
//! let directives = parse_config("tok\tspan\t\"X\"\nlemma\tb\tvalue").unwrap();
//! assert_eq!(directives.len(), 2);
//! assert!(directives[0].trigger().is_token());
//! assert_eq!(directives[0].open_token("hi"), "<span>Xhi");
//! assert_eq!(directives[0].close_transform("<span>Xhi"), "<span>Xhi</span>");
//! ```

mod content;
mod generated;
mod parser;
mod trigger;

pub use content::Content;
pub use generated::{Decoration, GeneratedElement};
pub use parser::parse_config;
pub use trigger::Trigger;

use crate::sgml::Element;

/// One configuration line.
///
/// Directives are immutable; their declaration order decides which tags end
/// up outermost when several apply to the same span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    trigger: Trigger,
    element: GeneratedElement,
    content: Content,
    line: usize,
}

impl Directive {
    /// Create a directive from already parsed parts.
    #[must_use]
    pub fn new(trigger: Trigger, element: GeneratedElement, content: Content) -> Self {
        Self {
            trigger,
            element,
            content,
            line: 0,
        }
    }

    #[must_use]
    pub fn trigger(&self) -> &Trigger {
        &self.trigger
    }

    #[must_use]
    pub fn element(&self) -> &GeneratedElement {
        &self.element
    }

    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// 1-based configuration line, 0 when built programmatically.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Whether the directive applies to `element`.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        self.trigger.matched_attr(element).is_some()
    }

    /// Prefix token text with the generated opening tag and content.
    ///
    /// The content always follows the tag, even when the generated element
    /// names a content attribute.
    #[must_use]
    pub fn open_token(&self, text: &str) -> String {
        let mut out = self.element.open_markup_inline(self.content.resolve_token());
        out.push_str(text);
        out
    }

    /// Prefix the text at the element's opening slot.
    ///
    /// Returns `text` unchanged when the directive does not match `element`.
    #[must_use]
    pub fn open_element(&self, element: &Element, text: &str) -> String {
        match self.trigger.matched_attr(element) {
            Some(attr) => self.open_matched(element, attr, text),
            None => text.to_owned(),
        }
    }

    pub(crate) fn open_matched(&self, element: &Element, attr: &str, text: &str) -> String {
        let content = self.content.resolve(element, attr);
        let mut out = self.element.open_markup(content.as_deref());
        out.push_str(text);
        out
    }

    /// Append the generated closing tag, if any.
    #[must_use]
    pub fn close_transform(&self, text: &str) -> String {
        let mut out = text.to_owned();
        out.push_str(&self.element.close_markup());
        out
    }
}

/// Remove one pair of surrounding double quotes.
fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}
