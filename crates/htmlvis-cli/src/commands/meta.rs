//! `htmlvis meta` command implementation.

use std::path::PathBuf;

use clap::Args;
use htmlvis::sgml::extract_meta;

use crate::error::CliError;
use crate::output::emit;

/// Arguments for the meta command.
#[derive(Args)]
pub(crate) struct MetaArgs {
    /// Annotated document whose `<meta>` line to read.
    document: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

impl MetaArgs {
    /// Execute the meta command.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or has no `<meta>` line.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let text = std::fs::read_to_string(&self.document)?;
        let json = meta_json(&text, self.pretty)?;
        emit(&json, None)?;
        Ok(())
    }
}

fn meta_json(text: &str, pretty: bool) -> Result<String, CliError> {
    let meta = extract_meta(text)
        .ok_or_else(|| CliError::Validation("Document has no <meta> line".to_owned()))?;
    let json = if pretty {
        serde_json::to_string_pretty(&meta)?
    } else {
        serde_json::to_string(&meta)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_meta_json_keeps_order() {
        let text = "<meta title=\"Letter 1\" author=\"Besa\" document_cts_urn=\"urn:cts:copticLit:besa\">\nⲁ\n";
        assert_eq!(
            meta_json(text, false).unwrap(),
            r#"{"title":"Letter 1","author":"Besa","document_cts_urn":"urn:cts:copticLit:besa"}"#
        );
    }

    #[test]
    fn test_meta_json_missing() {
        let err = meta_json("ⲁ\nⲃ", false).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }
}
