//! Building a format registry from an ANNIS export on disk.

use std::path::PathBuf;

use htmlvis::{FormatRegistry, VisualizationFormat};

use crate::{Config, ConfigError, VisMap};

/// Where a visualization format's files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSource {
    /// Format slug used as the wrapper class.
    pub slug: String,
    /// Display name from the vis map.
    pub title: String,
    /// `ExtData/<stem>.config`.
    pub config_path: PathBuf,
    /// `ExtData/<stem>.css`.
    pub css_path: PathBuf,
}

/// List the `htmldoc` formats of the configured corpus.
///
/// The slug is looked up by button title in `[formats]`, falling back to the
/// vis map's config name. The file stem comes from `[aliases]`, falling back
/// to the config name.
///
/// # Errors
///
/// Returns `ConfigError::VisMap` if the vis map cannot be read.
pub fn discover_formats(config: &Config) -> Result<Vec<FormatSource>, ConfigError> {
    let vis_map = VisMap::load(&config.corpus_resolved.vis_map_path())?;
    let ext_data = config.corpus_resolved.ext_data_dir();

    let sources = vis_map
        .htmldoc_formats()
        .into_iter()
        .map(|entry| {
            let config_name = entry.config_name();
            let slug = config
                .formats
                .get(entry.button_title())
                .map_or(config_name, String::as_str);
            let stem = config.config_stem(slug, config_name);

            FormatSource {
                slug: slug.to_owned(),
                title: entry.display_name.clone(),
                config_path: ext_data.join(format!("{stem}.config")),
                css_path: ext_data.join(format!("{stem}.css")),
            }
        })
        .collect();

    Ok(sources)
}

/// Read and parse one format's files.
///
/// A missing stylesheet is not an error; the format then carries only
/// `prelude`.
///
/// # Errors
///
/// Returns `ConfigError::MissingVisConfig` if the `.config` file is absent
/// and `ConfigError::HtmlVis` if it is malformed.
pub fn load_format(source: &FormatSource, prelude: &str) -> Result<VisualizationFormat, ConfigError> {
    if !source.config_path.exists() {
        return Err(ConfigError::MissingVisConfig {
            slug: source.slug.clone(),
            path: source.config_path.clone(),
        });
    }
    let config_text = std::fs::read_to_string(&source.config_path)?;

    let css = if source.css_path.exists() {
        std::fs::read_to_string(&source.css_path)?
    } else {
        tracing::warn!(
            slug = %source.slug,
            path = %source.css_path.display(),
            "Stylesheet not found"
        );
        String::new()
    };

    let css = match (prelude.trim().is_empty(), css.trim().is_empty()) {
        (true, _) => css,
        (false, true) => prelude.to_owned(),
        (false, false) => format!("{prelude}\n{css}"),
    };

    Ok(VisualizationFormat::parse(source.slug.as_str(), &config_text, css)?.with_title(&source.title))
}

/// Load only the format registered as `slug`.
///
/// Other formats' files are never read, so a broken format elsewhere in the
/// corpus does not affect this one.
///
/// # Errors
///
/// Returns `ConfigError::HtmlVis` wrapping
/// [`htmlvis::HtmlVisError::UnknownVisualizationFormat`] when the vis map has
/// no such format, checked before any config file is parsed.
pub fn load_named_format(config: &Config, slug: &str) -> Result<VisualizationFormat, ConfigError> {
    let source = discover_formats(config)?
        .into_iter()
        .find(|source| source.slug == slug)
        .ok_or_else(|| htmlvis::HtmlVisError::UnknownVisualizationFormat(slug.to_owned()))?;
    load_format(&source, &config.render.stylesheet_prelude)
}

/// Build a registry holding every `htmldoc` format of the configured corpus.
///
/// # Errors
///
/// Fails on the first format that cannot be discovered, read or parsed.
pub fn load_registry(config: &Config) -> Result<FormatRegistry, ConfigError> {
    let mut registry = FormatRegistry::new().with_separator(config.render.separator.as_str());

    for source in discover_formats(config)? {
        let format = load_format(&source, &config.render.stylesheet_prelude)?;
        tracing::debug!(
            slug = %source.slug,
            directives = format.directives().len(),
            "Registered visualization format"
        );
        registry.insert(format);
    }

    tracing::info!(formats = registry.len(), "Loaded visualization formats");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::VIS_MAP_FILENAME;

    const VIS_MAP: &str = "\
besa\tNULL\tNULL\tNULL\thtmldoc\tnormalized text (document)\thidden\t102\tconfig:verses
besa\tNULL\tNULL\tNULL\thtmldoc\tdiplomatic text (document)\thidden\t103\tconfig:dipl
";

    fn write_corpus(root: &Path) {
        let ext_data = root.join("ExtData");
        fs::create_dir_all(&ext_data).unwrap();
        fs::write(root.join(VIS_MAP_FILENAME), VIS_MAP).unwrap();
        fs::write(ext_data.join("verses.config"), "tok\tspan\nnorm\tb\tvalue\n").unwrap();
        fs::write(ext_data.join("verses.css"), ".norm b { color: blue; }").unwrap();
        fs::write(ext_data.join("dipl.config"), "# diplomatic\ntok\tNULL\n").unwrap();
    }

    fn config_for(root: &Path) -> Config {
        let mut config = Config::default_with_base(root);
        config.corpus_resolved.annis_dir = root.to_path_buf();
        config
    }

    #[test]
    fn test_discover_formats() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());

        let sources = discover_formats(&config_for(dir.path())).unwrap();
        let ext_data = dir.path().join("ExtData");
        assert_eq!(
            sources,
            vec![
                FormatSource {
                    slug: "norm".to_owned(),
                    title: "normalized text (document)".to_owned(),
                    config_path: ext_data.join("verses.config"),
                    css_path: ext_data.join("verses.css"),
                },
                FormatSource {
                    slug: "dipl".to_owned(),
                    title: "diplomatic text (document)".to_owned(),
                    config_path: ext_data.join("dipl.config"),
                    css_path: ext_data.join("dipl.css"),
                },
            ]
        );
    }

    #[test]
    fn test_alias_overrides_config_name() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());
        let mut config = config_for(dir.path());
        config.aliases.insert("dipl".to_owned(), "verses".to_owned());

        let sources = discover_formats(&config).unwrap();
        assert_eq!(sources[1].config_path, dir.path().join("ExtData/verses.config"));
    }

    #[test]
    fn test_load_registry_renders() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());
        let mut config = config_for(dir.path());
        config.render.stylesheet_prelude = "@font-face { font-family: Antinoou; }".to_owned();

        let registry = load_registry(&config).unwrap();
        assert_eq!(registry.slugs(), vec!["dipl", "norm"]);

        let norm = registry.get("norm").unwrap();
        assert_eq!(norm.title(), Some("normalized text (document)"));
        assert_eq!(
            norm.css(),
            "@font-face { font-family: Antinoou; }\n.norm b { color: blue; }"
        );

        let html = registry.render("dipl", "<norm norm=\"x\">\nw\n</norm>").unwrap();
        assert_eq!(
            html,
            r#"<div class="htmlvis dipl">w</div><style>@font-face { font-family: Antinoou; }</style>"#
        );
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());
        fs::remove_file(dir.path().join("ExtData/dipl.config")).unwrap();

        let err = load_registry(&config_for(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVisConfig { ref slug, .. } if slug == "dipl"));
    }

    #[test]
    fn test_malformed_config_file() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());
        fs::write(dir.path().join("ExtData/dipl.config"), "=a=b\tspan\n").unwrap();

        let err = load_registry(&config_for(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::HtmlVis(htmlvis::HtmlVisError::ConfigSyntax { line: 1, .. })
        ));
    }

    #[test]
    fn test_load_named_format_skips_broken_siblings() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());
        fs::write(dir.path().join("ExtData/dipl.config"), "=a=b\tspan\n").unwrap();
        let config = config_for(dir.path());

        let norm = load_named_format(&config, "norm").unwrap();
        assert_eq!(norm.slug(), "norm");

        fs::remove_file(dir.path().join("ExtData/dipl.config")).unwrap();
        assert!(load_named_format(&config, "norm").is_ok());
    }

    #[test]
    fn test_load_named_format_unknown_before_parsing() {
        let dir = tempfile::tempdir().unwrap();
        write_corpus(dir.path());
        fs::write(dir.path().join("ExtData/dipl.config"), "=a=b\tspan\n").unwrap();

        let err = load_named_format(&config_for(dir.path()), "bogus").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::HtmlVis(htmlvis::HtmlVisError::UnknownVisualizationFormat(ref slug))
                if slug == "bogus"
        ));
    }

    #[test]
    fn test_missing_vis_map() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_registry(&config_for(dir.path())).unwrap_err();
        assert!(matches!(err, ConfigError::VisMap { .. }));
    }
}
