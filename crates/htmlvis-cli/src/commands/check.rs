//! `htmlvis check` command implementation.

use std::path::PathBuf;

use clap::Args;
use htmlvis::directive::parse_config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Visualization config files to validate.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Every file is checked even after a failure.
    ///
    /// # Errors
    ///
    /// Returns an error if any file is unreadable or malformed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut failed = 0;

        for path in &self.files {
            match check_file(path) {
                Ok(count) => {
                    output.success(&format!("{}: {count} directives", path.display()));
                }
                Err(err) => {
                    failed += 1;
                    output.error(&format!("{}: {err}", path.display()));
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Validation(format!(
                "{failed} of {} config files failed",
                self.files.len()
            )));
        }
        Ok(())
    }
}

/// Parse one config file, returning its directive count.
fn check_file(path: &std::path::Path) -> Result<usize, CliError> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_config(&text)?.len())
}
