//! Registry of visualization formats.
//!
//! Parses each format's configuration once so documents can be rendered
//! repeatedly without re-reading the directives.

use std::collections::HashMap;

use crate::directive::{Directive, parse_config};
use crate::error::HtmlVisError;
use crate::renderer::{Renderer, append_stylesheet};
use crate::sgml::parse_annotations;

/// A named configuration with its stylesheet.
#[derive(Debug, Clone)]
pub struct VisualizationFormat {
    slug: String,
    title: Option<String>,
    directives: Vec<Directive>,
    css: String,
}

impl VisualizationFormat {
    /// Parse `config_text` into a format named `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlVisError::ConfigSyntax`] if the configuration is malformed.
    pub fn parse(
        slug: impl Into<String>,
        config_text: &str,
        css: impl Into<String>,
    ) -> Result<Self, HtmlVisError> {
        Ok(Self {
            slug: slug.into(),
            title: None,
            directives: parse_config(config_text)?,
            css: css.into(),
        })
    }

    /// Attach a human-readable title (e.g. the ANNIS display name).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    #[must_use]
    pub fn css(&self) -> &str {
        &self.css
    }

    /// Render annotated text, followed by the format's stylesheet.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlVisError::Structure`] if the text has an unmatched
    /// closing tag.
    pub fn render(&self, text: &str, separator: &str) -> Result<String, HtmlVisError> {
        let annotated = parse_annotations(text)?;
        let mut html = Renderer::new(self.slug.as_str())
            .with_separator(separator)
            .render(annotated, &self.directives);
        append_stylesheet(&mut html, &self.css);
        Ok(html)
    }
}

/// Visualization formats by slug.
///
/// Immutable once built; share it behind an `Arc` to render from several
/// threads.
#[derive(Debug, Default)]
pub struct FormatRegistry {
    formats: HashMap<String, VisualizationFormat>,
    separator: String,
}

impl FormatRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Join token slots with `separator` in every rendered format.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Parse and register a format, replacing any format with the same slug.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlVisError::ConfigSyntax`] if the configuration is malformed.
    pub fn register(
        &mut self,
        slug: &str,
        config_text: &str,
        css: &str,
    ) -> Result<(), HtmlVisError> {
        let format = VisualizationFormat::parse(slug, config_text, css)?;
        self.insert(format);
        Ok(())
    }

    /// Register an already parsed format.
    pub fn insert(&mut self, format: VisualizationFormat) {
        let slug = format.slug.clone();
        if self.formats.insert(slug.clone(), format).is_some() {
            tracing::warn!(slug = %slug, "Replaced visualization format");
        }
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&VisualizationFormat> {
        self.formats.get(slug)
    }

    /// Look up a format, failing for unknown slugs.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlVisError::UnknownVisualizationFormat`].
    pub fn require(&self, slug: &str) -> Result<&VisualizationFormat, HtmlVisError> {
        self.get(slug)
            .ok_or_else(|| HtmlVisError::UnknownVisualizationFormat(slug.to_owned()))
    }

    /// Render `text` with the format registered as `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`HtmlVisError::UnknownVisualizationFormat`] before any parsing
    /// when `slug` is not registered, or [`HtmlVisError::Structure`] for
    /// malformed text.
    pub fn render(&self, slug: &str, text: &str) -> Result<String, HtmlVisError> {
        self.require(slug)?.render(text, &self.separator)
    }

    /// Registered slugs, sorted.
    #[must_use]
    pub fn slugs(&self) -> Vec<&str> {
        let mut slugs: Vec<&str> = self.formats.keys().map(String::as_str).collect();
        slugs.sort_unstable();
        slugs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}
