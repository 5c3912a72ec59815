//! ANNIS `resolver_vis_map.annis` parsing.
//!
//! Each tab-separated row registers one visualization for a corpus:
//!
//! ```text
//! corpus  version  namespace  element  vis_type  display_name  visibility  order  mappings
//! ```
//!
//! Only `htmldoc` rows matter here. Their `mappings` column names the
//! `ExtData` configuration, e.g. `config:verses`.

use std::collections::HashSet;
use std::path::Path;

use crate::ConfigError;

/// Name of the vis map file inside an ANNIS export.
pub const VIS_MAP_FILENAME: &str = "resolver_vis_map.annis";

const HTMLDOC: &str = "htmldoc";
const NULL: &str = "NULL";
const MIN_COLUMNS: usize = 5;

/// One row of the vis map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisMapEntry {
    pub corpus: String,
    pub version: Option<String>,
    pub namespace: Option<String>,
    pub element: Option<String>,
    pub vis_type: String,
    pub display_name: String,
    pub visibility: Option<String>,
    pub order: Option<i32>,
    /// `key:value` pairs from the last column, in order.
    pub mappings: Vec<(String, String)>,
}

impl VisMapEntry {
    fn parse(fields: &[&str]) -> Self {
        let column = |i: usize| {
            fields
                .get(i)
                .map(|f| f.trim())
                .filter(|f| !f.is_empty() && *f != NULL)
                .map(str::to_owned)
        };

        Self {
            corpus: column(0).unwrap_or_default(),
            version: column(1),
            namespace: column(2),
            element: column(3),
            vis_type: column(4).unwrap_or_default(),
            display_name: column(5).unwrap_or_default(),
            visibility: column(6),
            order: column(7).and_then(|o| o.parse().ok()),
            mappings: column(8).map(|m| parse_mappings(&m)).unwrap_or_default(),
        }
    }

    /// Whether this row is an HTML document visualization.
    #[must_use]
    pub fn is_htmldoc(&self) -> bool {
        self.vis_type == HTMLDOC
    }

    /// Look up a mapping value by key.
    #[must_use]
    pub fn mapping(&self, key: &str) -> Option<&str> {
        self.mappings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First word of the display name: `"diplomatic text (document)"` gives
    /// `"diplomatic"`.
    #[must_use]
    pub fn button_title(&self) -> &str {
        self.display_name.split_whitespace().next().unwrap_or_default()
    }

    /// `ExtData` stem from the `config:` mapping, falling back to the button
    /// title.
    #[must_use]
    pub fn config_name(&self) -> &str {
        self.mapping("config").unwrap_or_else(|| self.button_title())
    }
}

fn parse_mappings(text: &str) -> Vec<(String, String)> {
    text.split(';')
        .filter_map(|entry| entry.split_once(':'))
        .map(|(k, v)| (k.trim().to_owned(), v.trim().to_owned()))
        .collect()
}

/// Parsed vis map.
#[derive(Debug, Clone, Default)]
pub struct VisMap {
    entries: Vec<VisMapEntry>,
}

impl VisMap {
    /// Parse vis map text. Rows with fewer than five columns are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut entries = Vec::new();

        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < MIN_COLUMNS {
                tracing::warn!(line = index + 1, columns = fields.len(), "Skipping short vis map row");
                continue;
            }
            entries.push(VisMapEntry::parse(&fields));
        }

        Self { entries }
    }

    /// Read and parse a vis map file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::VisMap` if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::VisMap {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let map = Self::parse(&text);
        tracing::debug!(path = %path.display(), rows = map.entries.len(), "Loaded vis map");
        Ok(map)
    }

    #[must_use]
    pub fn entries(&self) -> &[VisMapEntry] {
        &self.entries
    }

    /// `htmldoc` rows in file order, one per config name.
    #[must_use]
    pub fn htmldoc_formats(&self) -> Vec<&VisMapEntry> {
        let mut seen = HashSet::new();
        let mut formats = Vec::new();

        for entry in self.entries.iter().filter(|e| e.is_htmldoc()) {
            if seen.insert(entry.config_name()) {
                formats.push(entry);
            } else {
                tracing::warn!(config = entry.config_name(), "Duplicate htmldoc format in vis map");
            }
        }

        formats
    }
}
