//! Triggering conditions (first configuration column).

use std::fmt;

use super::strip_quotes;
use crate::sgml::Element;

/// What a directive applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// `tok`: every token.
    Token,
    /// `name`: elements with this name.
    Annotation(String),
    /// `=value`: elements with any attribute equal to `value`.
    Value(String),
    /// `name=value`: elements whose `name` attribute equals `value`.
    AnnotationAndValue(String, String),
}

impl Trigger {
    /// Parse the triggering condition column.
    ///
    /// Returns a description of the problem when the field is malformed.
    pub(crate) fn parse(field: &str) -> Result<Self, &'static str> {
        let field = field.trim();
        if field.is_empty() {
            return Err("empty triggering condition");
        }
        if field.eq_ignore_ascii_case("tok") {
            return Ok(Self::Token);
        }
        if !field.contains('=') {
            return Ok(Self::Annotation(field.to_owned()));
        }

        let mut parts = field.split('=');
        let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err("expected exactly one '=' in triggering condition");
        };
        let value = strip_quotes(value).to_owned();

        if name.is_empty() {
            Ok(Self::Value(value))
        } else {
            Ok(Self::AnnotationAndValue(name.to_owned(), value))
        }
    }

    /// Whether this is the `tok` trigger.
    #[must_use]
    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token)
    }

    /// Name of the attribute this trigger matched on `element`.
    ///
    /// Returns `None` when the trigger does not apply. For
    /// [`Trigger::Annotation`] the matched attribute is the one named like
    /// the element, which may be absent. Token triggers never match elements.
    #[must_use]
    pub fn matched_attr<'e>(&'e self, element: &'e Element) -> Option<&'e str> {
        match self {
            Self::Token => None,
            Self::Annotation(name) => (element.name == *name).then_some(element.name.as_str()),
            Self::Value(value) => element.attrs.find_value(value),
            Self::AnnotationAndValue(name, value) => {
                (element.attrs.get(name) == Some(value.as_str())).then_some(name.as_str())
            }
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token => f.write_str("tok"),
            Self::Annotation(name) => f.write_str(name),
            Self::Value(value) => write!(f, "={value}"),
            Self::AnnotationAndValue(name, value) => write!(f, "{name}={value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sgml::Attributes;

    fn element(name: &str, attrs: &[(&str, &str)]) -> Element {
        let attrs: Attributes = attrs.iter().copied().collect();
        Element::new(name, attrs, 0, 0)
    }

    #[test]
    fn test_parse_token() {
        assert_eq!(Trigger::parse("tok"), Ok(Trigger::Token));
        assert_eq!(Trigger::parse("TOK"), Ok(Trigger::Token));
    }

    #[test]
    fn test_parse_annotation() {
        assert_eq!(
            Trigger::parse("title"),
            Ok(Trigger::Annotation("title".to_owned()))
        );
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(Trigger::parse("=God"), Ok(Trigger::Value("God".to_owned())));
        assert_eq!(
            Trigger::parse(r#"="God""#),
            Ok(Trigger::Value("God".to_owned()))
        );
    }

    #[test]
    fn test_parse_annotation_and_value() {
        assert_eq!(
            Trigger::parse(r#"pos="N""#),
            Ok(Trigger::AnnotationAndValue("pos".to_owned(), "N".to_owned()))
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!(Trigger::parse("=foo=bar").is_err());
        assert!(Trigger::parse("a=b=c").is_err());
        assert!(Trigger::parse("").is_err());
    }

    #[test]
    fn test_matched_attr() {
        let norm = element("norm", &[("xml:id", "u1"), ("norm", "God")]);

        assert_eq!(Trigger::Token.matched_attr(&norm), None);
        assert_eq!(
            Trigger::Annotation("norm".to_owned()).matched_attr(&norm),
            Some("norm")
        );
        assert_eq!(Trigger::Annotation("orig".to_owned()).matched_attr(&norm), None);
        assert_eq!(
            Trigger::Value("u1".to_owned()).matched_attr(&norm),
            Some("xml:id")
        );
        assert_eq!(
            Trigger::AnnotationAndValue("norm".to_owned(), "God".to_owned()).matched_attr(&norm),
            Some("norm")
        );
        assert_eq!(
            Trigger::AnnotationAndValue("norm".to_owned(), "god".to_owned()).matched_attr(&norm),
            None
        );
    }

    #[test]
    fn test_display_round_trips_syntax() {
        assert_eq!(Trigger::Token.to_string(), "tok");
        assert_eq!(Trigger::Value("x".to_owned()).to_string(), "=x");
        assert_eq!(
            Trigger::AnnotationAndValue("pos".to_owned(), "N".to_owned()).to_string(),
            "pos=N"
        );
    }
}
