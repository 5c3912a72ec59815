//! Content column: text inserted after the opening tag.

use std::borrow::Cow;

use super::strip_quotes;
use crate::sgml::Element;

const NAME_PLACEHOLDER: &str = "%%name%%";
const VALUE_PLACEHOLDER: &str = "%%value%%";

/// Text a directive inserts after its opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Nothing.
    None,
    /// `value`: the value of the matched attribute.
    Value,
    /// Literal text with `%%name%%` and `%%value%%` placeholders.
    Template(String),
}

impl Content {
    pub(crate) fn parse(field: &str) -> Self {
        let field = field.trim();
        if field.is_empty() {
            Self::None
        } else if field.eq_ignore_ascii_case("value") {
            Self::Value
        } else {
            Self::Template(strip_quotes(field).to_owned())
        }
    }

    /// Resolve against a matched element and attribute.
    ///
    /// A placeholder whose value is unavailable stays in the output as is.
    pub(crate) fn resolve<'a>(&'a self, element: &'a Element, attr: &str) -> Option<Cow<'a, str>> {
        let value = element.attrs.get(attr);
        match self {
            Self::None => None,
            Self::Value => value.map(Cow::Borrowed),
            Self::Template(template) => {
                let mut text = Cow::Borrowed(template.as_str());
                if text.contains(NAME_PLACEHOLDER) {
                    text = Cow::Owned(text.replace(NAME_PLACEHOLDER, &element.name));
                }
                if let Some(value) = value
                    && text.contains(VALUE_PLACEHOLDER)
                {
                    text = Cow::Owned(text.replace(VALUE_PLACEHOLDER, value));
                }
                Some(text)
            }
        }
    }

    /// Resolve for a token, where there is no element to draw values from.
    pub(crate) fn resolve_token(&self) -> Option<&str> {
        match self {
            Self::None | Self::Value => None,
            Self::Template(template) => Some(template),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sgml::Attributes;

    #[test]
    fn test_parse() {
        assert_eq!(Content::parse(""), Content::None);
        assert_eq!(Content::parse("  "), Content::None);
        assert_eq!(Content::parse("value"), Content::Value);
        assert_eq!(Content::parse("VALUE"), Content::Value);
        assert_eq!(
            Content::parse(r#""word""#),
            Content::Template("word".to_owned())
        );
        assert_eq!(Content::parse(r#"" ""#), Content::Template(" ".to_owned()));
        assert_eq!(Content::parse("bare"), Content::Template("bare".to_owned()));
    }

    #[test]
    fn test_resolve_template() {
        let attrs: Attributes = [("pos", "N")].into_iter().collect();
        let element = Element::new("pos", attrs, 0, 0);
        let content = Content::Template("%%name%%: %%value%%".to_owned());

        assert_eq!(
            content.resolve(&element, "pos").as_deref(),
            Some("pos: N")
        );
    }

    #[test]
    fn test_name_placeholder_is_element_name_for_value_match() {
        let attrs: Attributes = [("xml:id", "u1"), ("norm", "God")].into_iter().collect();
        let element = Element::new("norm", attrs, 0, 0);
        let content = Content::Template("%%name%%/%%value%%".to_owned());

        assert_eq!(
            content.resolve(&element, "xml:id").as_deref(),
            Some("norm/u1")
        );
    }

    #[test]
    fn test_unresolved_placeholder_stays_literal() {
        let element = Element::new("pb", Attributes::new(), 0, 0);
        let content = Content::Template("[%%value%%]".to_owned());

        assert_eq!(
            content.resolve(&element, "pb").as_deref(),
            Some("[%%value%%]")
        );
        assert_eq!(Content::Value.resolve(&element, "pb"), None);
    }

    #[test]
    fn test_resolve_token() {
        assert_eq!(Content::Value.resolve_token(), None);
        assert_eq!(
            Content::Template("%%value%%".to_owned()).resolve_token(),
            Some("%%value%%")
        );
    }
}
