//! Client configuration loaded from `~/.roster/config.yaml`
//!
//! Every field is optional in the file; missing fields fall back to defaults.
//! A missing file yields the default configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    API_PREFIX, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ORIGIN, DEFAULT_TIMEOUT_SECS,
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin of the backend, e.g. `http://localhost:8000`
    pub origin: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// tracing level: trace, debug, info, warn, error
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            origin: String::from(DEFAULT_ORIGIN),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: String::from("info"),
        }
    }
}

impl Config {
    /// Directory holding the config file and the log file
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }

    /// Load from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from an explicit path. A missing file is not an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let mut config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        config.origin = config.origin.trim().trim_end_matches('/').to_string();
        if config.origin.is_empty() {
            anyhow::bail!("config file {}: origin must not be empty", path.display());
        }
        Ok(config)
    }

    /// `<origin>/api`
    pub fn api_base(&self) -> String {
        format!("{}{}", self.origin, API_PREFIX)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parsed log level, `INFO` when unrecognized
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_base(), "http://localhost:8000/api");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "origin: https://school.example.com/\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base(), "https://school.example.com/api");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_and_timeout() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "timeout_secs: 5\nlog_level: debug\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "timeout_secs: [not, a, number]\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_empty_origin_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "origin: \"/\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
