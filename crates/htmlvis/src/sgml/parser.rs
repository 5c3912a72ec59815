//! Line-oriented SGML parsing.
//!
//! Each line of the input is an opening tag, a closing tag or a token. Open
//! elements are kept on one stack per element name, so same-named elements
//! may nest without a tree ever being built.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::element::{Attributes, Element, Token};
use super::AnnotatedText;
use crate::error::HtmlVisError;

/// Element name exempt from individuation.
const META: &str = "meta";

static OPEN_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<([^\s<>/]+)").unwrap());

static CLOSE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^</([^\s<>/]+)").unwrap());

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\s(\S*?)="([^"]*)""#).unwrap());

static META_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([\w._-]+)="(.*?)""#).unwrap());

/// Parse annotated text into tokens and closed elements.
///
/// Elements are returned in the order they were closed, not in the order
/// their opening tags appear.
///
/// # Errors
///
/// Returns [`HtmlVisError::Structure`] when a closing tag has no open element
/// of the same name.
pub fn parse_annotations(text: &str) -> Result<AnnotatedText, HtmlVisError> {
    let body = text.trim();
    // Line numbers refer to the untrimmed text.
    let leading = text[..text.len() - text.trim_start().len()].matches('\n').count();

    let mut parser = AnnotationParser::default();
    for (index, line) in body.lines().enumerate() {
        parser.feed(leading + index + 1, line)?;
    }
    Ok(parser.finish())
}

/// Extract the attributes of the first `<meta …>` line.
///
/// Cheaper than [`parse_annotations`] when only document metadata is needed.
#[must_use]
pub fn extract_meta(text: &str) -> Option<Attributes> {
    let line = text.lines().find(|line| line.starts_with("<meta"))?;
    Some(
        META_ATTR_RE
            .captures_iter(line)
            .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
            .collect(),
    )
}

/// Classification of a single input line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Open(&'a str),
    Close(&'a str),
    Token,
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim_end();
    if !trimmed.ends_with('>') {
        return Line::Token;
    }
    if trimmed.starts_with("</") {
        return match CLOSE_TAG_RE.captures(trimmed) {
            Some(caps) => Line::Close(caps.get(1).map_or("", |m| m.as_str())),
            None => Line::Token,
        };
    }
    match OPEN_TAG_RE.captures(trimmed) {
        Some(caps) => Line::Open(caps.get(1).map_or("", |m| m.as_str())),
        None => Line::Token,
    }
}

fn parse_attrs(line: &str) -> Attributes {
    ATTR_RE
        .captures_iter(line)
        .map(|caps| (caps[1].to_owned(), caps[2].to_owned()))
        .collect()
}

/// An element whose closing tag has not been seen yet.
#[derive(Debug)]
struct OpenElement {
    name: String,
    attrs: Attributes,
    position: usize,
}

#[derive(Debug, Default)]
struct AnnotationParser {
    tokens: Vec<Token>,
    elements: Vec<Element>,
    stacks: HashMap<String, Vec<OpenElement>>,
    meta: Option<Attributes>,
}

impl AnnotationParser {
    fn feed(&mut self, line_no: usize, line: &str) -> Result<(), HtmlVisError> {
        match classify(line) {
            Line::Close(name) => self.close(line_no, name),
            Line::Open(name) => {
                self.open(name, parse_attrs(line));
                Ok(())
            }
            Line::Token => {
                self.tokens.push(Token::new(self.tokens.len(), line));
                Ok(())
            }
        }
    }

    fn open(&mut self, name: &str, attrs: Attributes) {
        if name == META && self.meta.is_none() {
            self.meta = Some(attrs.clone());
        }
        self.stacks.entry(name.to_owned()).or_default().push(OpenElement {
            name: name.to_owned(),
            attrs,
            position: self.tokens.len(),
        });
    }

    fn close(&mut self, line_no: usize, name: &str) -> Result<(), HtmlVisError> {
        let open = self
            .stacks
            .get_mut(name)
            .and_then(Vec::pop)
            .ok_or_else(|| HtmlVisError::Structure {
                line: line_no,
                name: name.to_owned(),
            })?;

        let token_count = self.tokens.len();
        if token_count == open.position {
            tracing::debug!(element = %name, line = line_no, "Dropping element without tokens");
            return Ok(());
        }

        let element = Element::new(open.name, open.attrs, open.position, token_count - 1);
        individuate(element, &mut self.elements);
        Ok(())
    }

    fn finish(self) -> AnnotatedText {
        let unclosed: usize = self.stacks.values().map(Vec::len).sum();
        if unclosed > 0 {
            tracing::debug!(unclosed, "Ignoring elements left open at end of input");
        }
        tracing::debug!(
            tokens = self.tokens.len(),
            elements = self.elements.len(),
            "Parsed annotated text"
        );

        AnnotatedText {
            tokens: self.tokens,
            elements: self.elements,
            meta: self.meta,
        }
    }
}

/// Split an element carrying several plain attributes into single-attribute
/// siblings, appending the original first.
///
/// `<norm xml:id="u1" pos="N" norm="x">` becomes `<norm xml:id="u1" norm="x">`
/// plus `<pos pos="N">`, all with the same span.
fn individuate(mut element: Element, out: &mut Vec<Element>) {
    if element.name == META || element.attrs.len() <= 1 {
        out.push(element);
        return;
    }

    let siblings: Vec<Element> = element
        .attrs
        .iter()
        .filter(|(name, _)| *name != element.name && !name.contains(':'))
        .map(|(name, value)| {
            let attrs = [(name, value)].into_iter().collect();
            Element::new(name, attrs, element.open, element.close)
        })
        .collect();

    let own_name = element.name.as_str();
    element
        .attrs
        .retain(|name| name == own_name || name.contains(':'));

    out.push(element);
    out.extend(siblings);
}
