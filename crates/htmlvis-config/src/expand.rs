//! `${VAR}` references in corpus paths.
//!
//! Corpus exports usually live under a shared root, so `annis_dir` and
//! `ext_data` may name it through the environment:
//! `${CORPUS_ROOT:-/srv/corpora}/besa_ANNIS`.

use std::env::VarError;

use shellexpand::LookupError;

use crate::ConfigError;

/// Expand a corpus path value read from `field`.
///
/// Values without `${` pass through untouched; a plain `$` can appear in
/// directory names.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    match shellexpand::env_with_context(value, lookup) {
        Ok(expanded) => Ok(expanded.into_owned()),
        Err(err) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: describe(&err),
        }),
    }
}

/// Unset variables are errors unless `${VAR:-default}` supplies a fallback.
fn lookup(var: &str) -> Result<Option<String>, VarError> {
    std::env::var(var).map(Some)
}

fn describe(err: &LookupError<VarError>) -> String {
    match err.cause {
        VarError::NotPresent => format!("${{{}}} not set", err.var_name),
        VarError::NotUnicode(_) => format!("${{{}}} is not valid UTF-8", err.var_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_variable_replaces_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("HTMLVIS_CORPUS_ROOT", "/srv/corpora");
        }
        let result = expand_env("${HTMLVIS_CORPUS_ROOT:-/tmp}/besa_ANNIS", "corpus.annis_dir").unwrap();
        assert_eq!(result, "/srv/corpora/besa_ANNIS");
        unsafe {
            std::env::remove_var("HTMLVIS_CORPUS_ROOT");
        }
    }

    #[test]
    fn test_default_may_itself_be_a_path() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("HTMLVIS_EXT_DATA_UNSET");
        }
        let result = expand_env(
            "${HTMLVIS_EXT_DATA_UNSET:-shared/ExtData}/fonts",
            "corpus.ext_data",
        )
        .unwrap();
        assert_eq!(result, "shared/ExtData/fonts");
    }

    #[test]
    fn test_unset_variable_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("HTMLVIS_ANNIS_UNSET");
        }
        let err = expand_env("${HTMLVIS_ANNIS_UNSET}/x", "corpus.annis_dir").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in corpus.annis_dir: ${HTMLVIS_ANNIS_UNSET} not set"
        );
    }

    #[test]
    fn test_bare_dollar_kept() {
        let result = expand_env("corpora/$old/ExtData", "corpus.ext_data").unwrap();
        assert_eq!(result, "corpora/$old/ExtData");
    }
}
