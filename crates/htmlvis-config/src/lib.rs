//! Configuration and corpus loading for htmlvis.
//!
//! Parses `htmlvis.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. CLI settings can be
//! applied during load via [`CliSettings`].
//!
//! The corpus side reads an ANNIS export: [`VisMap`] parses
//! `resolver_vis_map.annis` and [`load_registry`] builds a
//! [`htmlvis::FormatRegistry`] from the `ExtData` `.config`/`.css` pairs it
//! names.
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `corpus.annis_dir`
//! - `corpus.ext_data`

mod corpus;
mod expand;
mod vis_map;

pub use corpus::{FormatSource, discover_formats, load_format, load_named_format, load_registry};
pub use vis_map::{VIS_MAP_FILENAME, VisMap, VisMapEntry};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the ANNIS export directory.
    pub annis_dir: Option<PathBuf>,
    /// Override the token separator.
    pub separator: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "htmlvis.toml";

/// Default `ExtData` directory name inside an ANNIS export.
const DEFAULT_EXT_DATA: &str = "ExtData";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Corpus location (paths are relative strings from TOML).
    corpus: CorpusConfigRaw,
    /// Rendering options.
    pub render: RenderConfig,
    /// Format slug to `ExtData` file stem, e.g. `norm = "verses"`.
    pub aliases: HashMap<String, String>,
    /// Vis map button title to format slug, e.g. `diplomatic = "dipl"`.
    pub formats: HashMap<String, String>,

    /// Resolved corpus configuration (set after loading).
    #[serde(skip)]
    pub corpus_resolved: CorpusConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw corpus configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CorpusConfigRaw {
    annis_dir: Option<String>,
    ext_data: Option<String>,
}

/// Resolved corpus configuration.
#[derive(Debug, Default)]
pub struct CorpusConfig {
    /// ANNIS export directory holding `resolver_vis_map.annis`.
    pub annis_dir: PathBuf,
    /// `ExtData` directory, relative to `annis_dir` unless absolute.
    pub ext_data: PathBuf,
}

impl CorpusConfig {
    /// Path of the vis map file.
    #[must_use]
    pub fn vis_map_path(&self) -> PathBuf {
        self.annis_dir.join(VIS_MAP_FILENAME)
    }

    /// Directory holding the visualization `.config` and `.css` files.
    #[must_use]
    pub fn ext_data_dir(&self) -> PathBuf {
        self.annis_dir.join(&self.ext_data)
    }
}

/// Rendering options.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RenderConfig {
    /// String placed between token slots.
    pub separator: String,
    /// CSS emitted before every format's own stylesheet (e.g. `@font-face`).
    pub stylesheet_prelude: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`corpus.annis_dir`").
        field: String,
        /// Error message (e.g., "${`CORPUS_ROOT`} not set").
        message: String,
    },
    /// A format named by the vis map has no `.config` file.
    #[error("Visualization config for '{slug}' not found: {}", .path.display())]
    MissingVisConfig {
        /// Format slug.
        slug: String,
        /// Expected config path.
        path: PathBuf,
    },
    /// The vis map is missing or unreadable.
    #[error("{} is missing or unreadable: {message}", .path.display())]
    VisMap {
        /// Expected vis map path.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },
    /// A visualization config failed to parse.
    #[error(transparent)]
    HtmlVis(#[from] htmlvis::HtmlVisError),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Button titles of the formats every Coptic SCRIPTORIUM corpus knows.
fn default_formats() -> HashMap<String, String> {
    [
        ("normalized", "norm"),
        ("analytic", "analytic"),
        ("diplomatic", "dipl"),
        ("chapter", "sahidica"),
    ]
    .into_iter()
    .map(|(title, slug)| (title.to_owned(), slug.to_owned()))
    .collect()
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `htmlvis.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(annis_dir) = &settings.annis_dir {
            self.corpus_resolved.annis_dir.clone_from(annis_dir);
        }
        if let Some(separator) = &settings.separator {
            self.render.separator.clone_from(separator);
        }
    }

    /// `ExtData` file stem for a format slug.
    ///
    /// An alias wins over the vis map's `config:` mapping.
    #[must_use]
    pub fn config_stem<'a>(&'a self, slug: &'a str, config_name: &'a str) -> &'a str {
        self.aliases.get(slug).map_or(config_name, String::as_str)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            corpus: CorpusConfigRaw::default(),
            render: RenderConfig::default(),
            aliases: HashMap::new(),
            formats: default_formats(),
            corpus_resolved: CorpusConfig {
                annis_dir: base.to_path_buf(),
                ext_data: PathBuf::from(DEFAULT_EXT_DATA),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded htmlvis config");

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.corpus_resolved.ext_data.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "corpus.ext_data cannot be empty".to_owned(),
            ));
        }

        for (slug, stem) in &self.aliases {
            require_non_empty(slug, "aliases key")?;
            require_non_empty(stem, &format!("aliases.{slug}"))?;
        }
        for (title, slug) in &self.formats {
            require_non_empty(title, "formats key")?;
            require_non_empty(slug, &format!("formats.{title}"))?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.corpus.annis_dir {
            self.corpus.annis_dir = Some(expand::expand_env(dir, "corpus.annis_dir")?);
        }
        if let Some(ref dir) = self.corpus.ext_data {
            self.corpus.ext_data = Some(expand::expand_env(dir, "corpus.ext_data")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.corpus_resolved = CorpusConfig {
            annis_dir: config_dir.join(self.corpus.annis_dir.as_deref().unwrap_or(".")),
            ext_data: PathBuf::from(self.corpus.ext_data.as_deref().unwrap_or(DEFAULT_EXT_DATA)),
        };
    }
}
