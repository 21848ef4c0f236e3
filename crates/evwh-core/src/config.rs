//! Configuration types and parsing for evwh.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Public Washington State EV population CSV export
pub const DEFAULT_SOURCE_URL: &str = "https://data.wa.gov/api/views/f6w7-q2d2/rows.csv";

/// Config file names searched by [`Config::load_from_dir`], in order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["evwh.yml", "evwh.yaml"];

/// Main pipeline configuration from evwh.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Where the raw CSV comes from
    #[serde(default)]
    pub source: SourceConfig,

    /// Warehouse connection
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Imputation tuning
    #[serde(default)]
    pub imputation: ImputationConfig,
}

/// Source endpoint configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// CSV download URL
    #[serde(default = "default_source_url")]
    pub url: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB file path, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Imputation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImputationConfig {
    /// Model year used when the run has no model year to take a mode from
    #[serde(default = "default_fallback_model_year")]
    pub fallback_model_year: i64,
}

impl Default for ImputationConfig {
    fn default() -> Self {
        Self {
            fallback_model_year: default_fallback_model_year(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "ev_warehouse".to_string(),
            source: SourceConfig::default(),
            database: DatabaseConfig::default(),
            imputation: ImputationConfig::default(),
        }
    }
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_db_path() -> String {
    "ev_warehouse.duckdb".to_string()
}

fn default_fallback_model_year() -> i64 {
    2020
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for evwh.yml or evwh.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.exists())
            .map(|p| Self::load(&p))
            .unwrap_or_else(|| {
                Err(CoreError::ConfigNotFound {
                    path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
                })
            })
    }

    /// Load from a directory if a config file exists there, defaults otherwise
    pub fn load_from_dir_or_default(dir: &Path) -> CoreResult<Self> {
        match Self::load_from_dir(dir) {
            Err(CoreError::ConfigNotFound { path }) => {
                log::debug!("No config at {}, using defaults", path);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Render this configuration as YAML
    pub fn to_yaml(&self) -> CoreResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if !(self.source.url.starts_with("http://") || self.source.url.starts_with("https://")) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "source.url must be an http(s) URL, got '{}'",
                    self.source.url
                ),
            });
        }

        if self.source.timeout_secs == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "source.timeout_secs must be greater than zero".to_string(),
            });
        }

        if self.database.path.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
