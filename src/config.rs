//! Configuration management and validation.
//!
//! Provides the run configuration (input export, database and ingest
//! policy) and its layered loading: built-in defaults, then an optional
//! JSON file, then environment variables, then command-line overrides.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_DATABASE_PATH, DEFAULT_INPUT_PATH, env,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// What to do with a line from which no field could be extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EmptyRecordPolicy {
    /// Skip the line and log a warning
    #[default]
    Skip,
    /// Write a row with every column NULL
    #[serde(rename = "nulls")]
    #[value(name = "nulls")]
    InsertNulls,
}

impl FromStr for EmptyRecordPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "nulls" | "insert_nulls" => Ok(Self::InsertNulls),
            other => Err(Error::configuration(format!(
                "Unknown empty-line policy '{}' (expected 'skip' or 'nulls')",
                other
            ))),
        }
    }
}

/// Input export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the newline-separated listing export
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_INPUT_PATH),
        }
    }
}

/// Destination database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file, created if missing
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

/// Per-line ingest behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub empty_lines: EmptyRecordPolicy,
    pub show_progress: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            empty_lines: EmptyRecordPolicy::Skip,
            show_progress: true,
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub storage: StorageConfig,
    pub ingest: IngestConfig,
}

impl Config {
    /// Default config file location (`<config dir>/exrates/config.json`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Load a configuration from a JSON file
    ///
    /// Unreadable and malformed files are both configuration errors.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Build the configuration from defaults, file, environment and overrides
    pub fn load_layered(
        input_path: Option<PathBuf>,
        database_path: Option<PathBuf>,
        config_file: Option<&Path>,
    ) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading config file {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;

        if let Some(path) = input_path {
            config.input.path = path;
        }
        if let Some(path) = database_path {
            config.storage.database_path = path;
        }

        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(env::INPUT).filter(|v| !v.is_empty()) {
            self.input.path = PathBuf::from(path);
        }
        if let Some(path) = lookup(env::DATABASE).filter(|v| !v.is_empty()) {
            self.storage.database_path = PathBuf::from(path);
        }
        if let Some(policy) = lookup(env::EMPTY_LINES).filter(|v| !v.is_empty()) {
            self.ingest.empty_lines = policy.parse()?;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.input.path.as_os_str().is_empty() {
            return Err(Error::configuration("Input path cannot be empty"));
        }
        if self.storage.database_path.as_os_str().is_empty() {
            return Err(Error::configuration("Database path cannot be empty"));
        }
        Ok(())
    }
}
