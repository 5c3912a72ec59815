//! `htmlvis formats` command implementation.

use std::path::PathBuf;

use clap::Args;
use htmlvis_config::{CliSettings, Config, discover_formats};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the formats command.
#[derive(Args)]
pub(crate) struct FormatsArgs {
    /// Path to configuration file (default: auto-discover htmlvis.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ANNIS export directory (overrides config).
    #[arg(long)]
    annis_dir: Option<PathBuf>,
}

impl FormatsArgs {
    /// Execute the formats command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or the vis map cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            annis_dir: self.annis_dir,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.highlight(&format!(
            "Formats in {}",
            config.corpus_resolved.annis_dir.display()
        ));

        let sources = discover_formats(&config)?;
        if sources.is_empty() {
            output.warning("No htmldoc visualizations found");
            return Ok(());
        }

        for source in &sources {
            let line = format!(
                "  {:<12} {} ({})",
                source.slug,
                source.title,
                source.config_path.display()
            );
            if source.config_path.exists() {
                output.info(&line);
            } else {
                output.warning(&format!("{line} [config missing]"));
            }
        }
        Ok(())
    }
}
