//! Generated element column: the tag a directive emits.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

/// Element name meaning "emit no tag".
const NULL_ELEMENT: &str = "NULL";

static STYLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"style="([^"]*?)""#).unwrap());

/// Presentation attached to a generated tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoration {
    /// `style="word"`: a CSS class.
    Class(String),
    /// `style="color: red"`: an inline style declaration.
    Style(String),
}

/// The tag a directive wraps around its target.
///
/// Syntax: `name[:attr][; style="class-or-style"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedElement {
    /// Tag name, or `None` for `NULL`.
    pub name: Option<String>,
    /// Attribute of the generated tag that receives the content.
    pub attr: Option<String>,
    /// Class or inline style of the generated tag.
    pub decoration: Option<Decoration>,
}

impl GeneratedElement {
    /// Parse the generated element column.
    ///
    /// Returns `None` when no element name is given.
    pub(crate) fn parse(field: &str) -> Option<Self> {
        let (head, attrs_text) = match field.split_once(';') {
            Some((head, rest)) => (head, Some(rest)),
            None => (field, None),
        };

        let (name, attr) = match head.split_once(':') {
            Some((name, attr)) => (name.trim(), Some(attr.trim())),
            None => (head.trim(), None),
        };
        if name.is_empty() {
            return None;
        }

        let decoration = attrs_text
            .and_then(|text| STYLE_RE.captures(text))
            .map(|caps| {
                let value = caps[1].to_owned();
                if value.contains(':') {
                    Decoration::Style(value)
                } else {
                    Decoration::Class(value)
                }
            });

        Some(Self {
            name: (name != NULL_ELEMENT).then(|| name.to_owned()),
            attr: attr.filter(|a| !a.is_empty()).map(str::to_owned),
            decoration,
        })
    }

    /// Render the opening markup followed by `content`.
    ///
    /// With a content attribute the content goes into that attribute,
    /// otherwise it follows the opening tag. A `NULL` element emits the
    /// content alone.
    pub(crate) fn open_markup(&self, content: Option<&str>) -> String {
        self.render_open(content, self.attr.as_deref())
    }

    /// Render the opening markup with `content` always after the tag.
    ///
    /// Token directives never place content in an attribute.
    pub(crate) fn open_markup_inline(&self, content: Option<&str>) -> String {
        self.render_open(content, None)
    }

    fn render_open(&self, content: Option<&str>, attr: Option<&str>) -> String {
        let content = content.filter(|c| !c.is_empty());
        let Some(name) = &self.name else {
            return content.unwrap_or_default().to_owned();
        };

        let mut out = format!("<{name}");
        match &self.decoration {
            Some(Decoration::Class(class)) => write!(out, r#" class="{class}""#).unwrap(),
            Some(Decoration::Style(style)) => write!(out, r#" style="{style}""#).unwrap(),
            None => {}
        }
        match (content, attr) {
            (Some(content), Some(attr)) => write!(out, r#" {attr}="{content}">"#).unwrap(),
            (Some(content), None) => {
                out.push('>');
                out.push_str(content);
            }
            (None, _) => out.push('>'),
        }
        out
    }

    /// Render the closing tag, empty for `NULL`.
    pub(crate) fn close_markup(&self) -> String {
        self.name
            .as_ref()
            .map(|name| format!("</{name}>"))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_only() {
        let generated = GeneratedElement::parse("span").unwrap();
        assert_eq!(generated.name.as_deref(), Some("span"));
        assert_eq!(generated.attr, None);
        assert_eq!(generated.decoration, None);
    }

    #[test]
    fn test_parse_attr() {
        let generated = GeneratedElement::parse("a:title").unwrap();
        assert_eq!(generated.name.as_deref(), Some("a"));
        assert_eq!(generated.attr.as_deref(), Some("title"));
    }

    #[test]
    fn test_parse_class() {
        let generated = GeneratedElement::parse(r#"table:title; style="pb""#).unwrap();
        assert_eq!(generated.name.as_deref(), Some("table"));
        assert_eq!(generated.attr.as_deref(), Some("title"));
        assert_eq!(generated.decoration, Some(Decoration::Class("pb".to_owned())));
    }

    #[test]
    fn test_parse_style() {
        let generated = GeneratedElement::parse(r#"span; style="color: red""#).unwrap();
        assert_eq!(
            generated.decoration,
            Some(Decoration::Style("color: red".to_owned()))
        );
    }

    #[test]
    fn test_parse_without_style_pattern() {
        let generated = GeneratedElement::parse("span;color:red").unwrap();
        assert_eq!(generated.name.as_deref(), Some("span"));
        assert_eq!(generated.attr, None);
        assert_eq!(generated.decoration, None);
    }

    #[test]
    fn test_parse_null_and_empty() {
        let generated = GeneratedElement::parse("NULL").unwrap();
        assert_eq!(generated.name, None);
        assert!(GeneratedElement::parse("").is_none());
        assert!(GeneratedElement::parse(":title").is_none());
    }

    #[test]
    fn test_open_markup() {
        let generated = GeneratedElement::parse(r#"div:line; style="copt_line""#).unwrap();
        assert_eq!(
            generated.open_markup(Some("12")),
            r#"<div class="copt_line" line="12">"#
        );
        assert_eq!(generated.open_markup(None), r#"<div class="copt_line">"#);

        let plain = GeneratedElement::parse("b").unwrap();
        assert_eq!(plain.open_markup(Some("cat")), "<b>cat");
        assert_eq!(plain.open_markup(Some("")), "<b>");
        assert_eq!(plain.close_markup(), "</b>");
    }

    #[test]
    fn test_open_markup_inline_ignores_attr() {
        let generated = GeneratedElement::parse(r#"span:title; style="tok""#).unwrap();
        assert_eq!(
            generated.open_markup_inline(Some("X")),
            r#"<span class="tok">X"#
        );
        assert_eq!(
            generated.open_markup(Some("X")),
            r#"<span class="tok" title="X">"#
        );
    }

    #[test]
    fn test_null_markup() {
        let null = GeneratedElement::parse("NULL").unwrap();
        assert_eq!(null.open_markup(Some(" ")), " ");
        assert_eq!(null.open_markup(None), "");
        assert_eq!(null.close_markup(), "");
    }
}
