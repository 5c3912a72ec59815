//! Configuration-driven HTML visualization of annotated corpus documents.
//!
//! Documents are TreeTagger-style SGML with one structural unit per line:
//! tokens on their own lines, elements opened and closed by tag lines. A
//! visualization format is an ordered list of [`directive::Directive`]s that
//! say which tag to wrap around which tokens or annotated spans.
//!
//! # Architecture
//!
//! Rendering runs three independent stages:
//! - [`directive::parse_config`]: configuration text into directives
//! - [`sgml::parse_annotations`]: document text into tokens and elements
//! - [`Renderer`]: directives applied to token slots, joined into one
//!   `<div class="htmlvis {format}">` wrapper
//!
//! [`FormatRegistry`] caches parsed directives per format for repeated use.
//!
//! # Example
//!
//! ```
//! let html = htmlvis::generate_visualization(
//!     "tok\tspan\nnorm\tb\tvalue",
//!     "<norm norm=\"ⲕⲟⲥⲙⲟⲥ\">\nⲕⲟⲥⲙⲟⲥ\n</norm>",
//!     "norm",
//! )
//! .unwrap();
//! assert_eq!(html, r#"<div class="htmlvis norm"><b>ⲕⲟⲥⲙⲟⲥ<span>ⲕⲟⲥⲙⲟⲥ</span></b></div>"#);
//! ```

pub mod directive;
mod error;
mod registry;
mod renderer;
pub mod sgml;

pub use error::HtmlVisError;
pub use registry::{FormatRegistry, VisualizationFormat};
pub use renderer::{Renderer, WRAPPER_CLASS, append_stylesheet, render_html};

/// Render `text` with the directives in `config_text`.
///
/// The configuration is parsed before the document, so a malformed
/// configuration is reported even when the document is malformed too.
///
/// # Errors
///
/// Returns [`HtmlVisError::ConfigSyntax`] for a malformed configuration and
/// [`HtmlVisError::Structure`] for an unmatched closing tag.
pub fn generate_visualization(
    config_text: &str,
    text: &str,
    format: &str,
) -> Result<String, HtmlVisError> {
    let directives = directive::parse_config(config_text)?;
    let annotated = sgml::parse_annotations(text)?;
    Ok(Renderer::new(format).render(annotated, &directives))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_config_error_reported_first() {
        let err = generate_visualization("=a=b\tspan", "</norm>", "x").unwrap_err();
        assert!(matches!(err, HtmlVisError::ConfigSyntax { line: 1, .. }));
    }

    #[test]
    fn test_structure_error() {
        let err = generate_visualization("tok\tspan", "w\n</norm>", "x").unwrap_err();
        assert_eq!(
            err,
            HtmlVisError::Structure {
                line: 2,
                name: "norm".to_owned()
            }
        );
    }

    #[test]
    fn test_page_break_table() {
        let config = "tok\tNULL\npb_xml_id\ttable:title; style=\"pb\"\t\"%%value%%\"";
        let text = "<pb_xml_id pb_xml_id=\"p1\">\nⲁ\nⲃ\n</pb_xml_id>";

        let html = generate_visualization(config, text, "dipl").unwrap();
        assert_eq!(
            html,
            r#"<div class="htmlvis dipl"><table class="pb" title="p1">ⲁⲃ</table></div>"#
        );
    }
}
