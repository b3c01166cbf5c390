//! Configuration management for preflight.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "preflight";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `PREFLIGHT_`)
/// 2. TOML config file at `~/.config/preflight/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output path configuration.
    pub paths: PathsConfig,
    /// Output artifact configuration.
    pub output: OutputConfig,
    /// Default facet codes for the `generate` command.
    pub defaults: DefaultsConfig,
}

/// Input and output path configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the checklist JSON files.
    /// Defaults to `data/json` relative to the working directory.
    pub data_dir: Option<PathBuf>,
    /// Path to the facet constants JSON file.
    /// Defaults to `data/constants.json`.
    pub constants_file: Option<PathBuf>,
    /// Directory that receives the generated document folders.
    /// Defaults to `output`.
    pub output_dir: Option<PathBuf>,
}

/// Output artifact configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Filename of the compact summary checklist PDF.
    pub summary_filename: String,
    /// Filename of the detailed procedure manual PDF.
    pub manual_filename: String,
    /// Name of the archive directory inside the output directory.
    pub archive_dir_name: String,
}

/// Default facet codes used when the `generate` flags are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default operation type code.
    pub operation: String,
    /// Default drone platform code.
    pub platform: String,
    /// Default drone count code.
    pub count: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summary_filename: "checklist.pdf".to_string(),
            manual_filename: "procedures.pdf".to_string(),
            archive_dir_name: "archive".to_string(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            operation: "VLOS".to_string(),
            platform: "DJI".to_string(),
            count: "SINGLE".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `PREFLIGHT_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("PREFLIGHT_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("output.summary_filename", &self.output.summary_filename),
            ("output.manual_filename", &self.output.manual_filename),
            ("output.archive_dir_name", &self.output.archive_dir_name),
            ("defaults.operation", &self.defaults.operation),
            ("defaults.platform", &self.defaults.platform),
            ("defaults.count", &self.defaults.count),
        ] {
            if value.trim().is_empty() {
                return Err(Error::config_validation(format!(
                    "{name} must not be empty"
                )));
            }
        }

        if self.output.summary_filename == self.output.manual_filename {
            return Err(Error::config_validation(
                "summary_filename and manual_filename must differ",
            ));
        }

        Ok(())
    }

    /// Get the checklist data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.paths
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("data").join("json"))
    }

    /// Get the facet constants file path, resolving defaults if not set.
    #[must_use]
    pub fn constants_file(&self) -> PathBuf {
        self.paths
            .constants_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("data").join("constants.json"))
    }

    /// Get the output directory, resolving defaults if not set.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.paths
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("output"))
    }

    /// Get the archive directory inside the output directory.
    #[must_use]
    pub fn archive_dir(&self) -> PathBuf {
        self.output_dir().join(&self.output.archive_dir_name)
    }
}
