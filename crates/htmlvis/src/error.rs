//! Error types for the htmlvis engine.

/// Error raised while parsing a configuration or a document, or while
/// selecting a visualization format.
///
/// Every variant aborts the render that produced it; the engine never
/// returns partial output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum HtmlVisError {
    /// A configuration line could not be parsed.
    #[error("malformed config line {line}: {message}: {text}")]
    ConfigSyntax {
        /// 1-based line number in the configuration text.
        line: usize,
        /// The offending field or line.
        text: String,
        /// What was wrong with it.
        message: String,
    },

    /// A closing tag has no open element of the same name.
    #[error("closing tag </{name}> on line {line} has no matching opening tag")]
    Structure {
        /// 1-based line number in the document text.
        line: usize,
        /// Element name from the closing tag.
        name: String,
    },

    /// The requested visualization format is not registered.
    #[error("unknown visualization format: {0}")]
    UnknownVisualizationFormat(String),
}

impl HtmlVisError {
    pub(crate) fn config_syntax(line: usize, text: &str, message: impl Into<String>) -> Self {
        Self::ConfigSyntax {
            line,
            text: text.to_owned(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_syntax_display() {
        let err = HtmlVisError::config_syntax(3, "=foo=bar", "expected exactly one '='");
        assert_eq!(
            err.to_string(),
            "malformed config line 3: expected exactly one '=': =foo=bar"
        );
    }

    #[test]
    fn test_structure_display() {
        let err = HtmlVisError::Structure {
            line: 7,
            name: "norm".to_owned(),
        };
        assert!(err.to_string().contains("</norm>"));
        assert!(err.to_string().contains("line 7"));
    }
}
