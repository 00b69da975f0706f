//! Configuration management with layered hierarchy
//!
//! Built-in defaults, then the global `config.yaml`, then environment
//! variables. Command-line flags are applied last by the CLI.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Name used for the config and data directories
pub const APP_NAME: &str = "pcat";

/// Overrides the config file location
pub const ENV_CONFIG: &str = "PCAT_CONFIG";
/// Overrides the data file
pub const ENV_DB: &str = "PCAT_DB";
/// Overrides the default output format
pub const ENV_FORMAT: &str = "PCAT_FORMAT";

/// Values as read from one layer. Unset keys leave lower layers in place.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Path of the JSON catalog document
    pub data_file: Option<PathBuf>,

    /// Default output format for list commands
    pub default_format: Option<String>,

    /// Ask before destructive operations
    pub confirm: Option<bool>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        if let Some(path) = Self::config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match serde_yml::from_str::<Config>(&contents) {
                        Ok(file) => {
                            debug!(path = %path.display(), "config file loaded");
                            config.merge(file);
                        }
                        Err(e) => warn!(path = %path.display(), error = %e, "ignoring malformed config file"),
                    },
                    Err(e) => warn!(path = %path.display(), error = %e, "cannot read config file"),
                }
            }
        }

        config.merge(Self::from_env());
        config
    }

    fn from_env() -> Self {
        Self {
            data_file: non_empty_env(ENV_DB).map(PathBuf::from),
            default_format: non_empty_env(ENV_FORMAT),
            confirm: None,
        }
    }

    /// Location of the global config file
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = non_empty_env(ENV_CONFIG) {
            return Some(PathBuf::from(path));
        }
        directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Default location of the catalog document
    pub fn default_data_file() -> PathBuf {
        directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.data_dir().join("catalog.json"))
            .unwrap_or_else(|| PathBuf::from("catalog.json"))
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.data_file.is_some() {
            self.data_file = other.data_file;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.confirm.is_some() {
            self.confirm = other.confirm;
        }
    }

    /// Effective data file
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(Self::default_data_file)
    }

    /// Whether destructive operations ask first
    pub fn confirm(&self) -> bool {
        self.confirm.unwrap_or(true)
    }

    /// The config with every default filled in, for display
    pub fn resolved(&self) -> Config {
        Config {
            data_file: Some(self.data_file()),
            default_format: Some(
                self.default_format
                    .clone()
                    .unwrap_or_else(|| "auto".to_string()),
            ),
            confirm: Some(self.confirm()),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
