//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use evwh_core::{Config, Dataset, IngestReport};
use evwh_extract::{extract, FileSource, HttpSource, Source};
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load the config named by `--config`, or the project directory's config
/// (defaults when the directory has none).
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path)),
        None => Config::load_from_dir_or_default(Path::new(&global.project_dir))
            .context("Failed to load project config"),
    }
}

/// Local file when `--input` is given, the configured URL otherwise.
pub(crate) fn source_for(input: Option<&str>, config: &Config) -> Box<dyn Source> {
    match input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::from_config(&config.source)),
    }
}

/// Extract and type the raw registrations.
pub(crate) fn extract_dataset(
    input: Option<&str>,
    config: &Config,
) -> Result<(Dataset, IngestReport)> {
    let source = source_for(input, config);
    extract(source.as_ref())
        .with_context(|| format!("Failed to extract from {}", source.describe()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn global(project_dir: &str, config: Option<String>) -> GlobalArgs {
        GlobalArgs {
            verbose: false,
            project_dir: project_dir.to_string(),
            config,
        }
    }

    #[test]
    fn test_load_config_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&global(dir.path().to_str().unwrap(), None)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("other.yml").display().to_string();
        assert!(load_config(&global(".", Some(missing))).is_err());
    }

    #[test]
    fn test_source_for_prefers_input() {
        let config = Config::default();
        assert_eq!(source_for(Some("ev.csv"), &config).describe(), "ev.csv");
        assert_eq!(
            source_for(None, &config).describe(),
            evwh_core::config::DEFAULT_SOURCE_URL
        );
    }
}
