//! `htmlvis render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use htmlvis_config::{CliSettings, Config, FormatSource, load_format, load_named_format};

use crate::error::CliError;
use crate::output::{Output, emit};

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Annotated document (one token or tag per line).
    document: PathBuf,

    /// Visualization format slug (default: file stem of --vis-config).
    #[arg(short, long)]
    format: Option<String>,

    /// Visualization config file to use instead of the corpus formats.
    #[arg(long)]
    vis_config: Option<PathBuf>,

    /// Stylesheet for --vis-config (default: sibling `.css` file, if any).
    #[arg(long, requires = "vis_config")]
    css: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover htmlvis.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ANNIS export directory (overrides config).
    #[arg(long)]
    annis_dir: Option<PathBuf>,

    /// String placed between tokens (overrides config).
    #[arg(long)]
    separator: Option<String>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration, the format or the document
    /// cannot be loaded, or the document is malformed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            annis_dir: self.annis_dir.clone(),
            separator: self.separator.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let text = std::fs::read_to_string(&self.document)?;
        let html = self.render(&config, &text)?;

        emit(&html, self.output.as_deref())?;
        if let Some(path) = &self.output {
            output.success(&format!("Wrote {}", path.display()));
        }
        Ok(())
    }

    fn render(&self, config: &Config, text: &str) -> Result<String, CliError> {
        if let Some(vis_config) = &self.vis_config {
            return self.render_standalone(config, vis_config, text);
        }

        let slug = self.format.as_deref().ok_or_else(|| {
            CliError::Validation("--format is required without --vis-config".to_owned())
        })?;
        let format = load_named_format(config, slug)?;
        Ok(format.render(text, &config.render.separator)?)
    }

    /// Render with a single config file outside any corpus.
    fn render_standalone(
        &self,
        config: &Config,
        vis_config: &Path,
        text: &str,
    ) -> Result<String, CliError> {
        if let Some(css) = &self.css
            && !css.exists()
        {
            return Err(CliError::Validation(format!(
                "Stylesheet not found: {}",
                css.display()
            )));
        }

        let slug = self
            .format
            .clone()
            .unwrap_or_else(|| slug_from_path(vis_config));
        let source = FormatSource {
            title: slug.clone(),
            slug,
            config_path: vis_config.to_path_buf(),
            css_path: self
                .css
                .clone()
                .unwrap_or_else(|| vis_config.with_extension("css")),
        };

        let format = load_format(&source, &config.render.stylesheet_prelude)?;
        Ok(format.render(text, &config.render.separator)?)
    }
}

/// Format slug derived from a config file name: `dipl.config` gives `dipl`.
fn slug_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
