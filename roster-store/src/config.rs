//! Configuration management.

use crate::error::StoreError;
use crate::persistence::{default_cache_path, default_config_path, default_output_path};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Application configuration, read from `config.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Unit number whose membership is synced.
    pub unit: u64,
    /// Snapshot cache file.
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    /// Roster output file.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Whether the system keychain is consulted for credentials.
    #[serde(default)]
    pub keychain: bool,
    /// HTTP request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Creates a config for `unit` with every optional field at its default.
    pub fn new(unit: u64) -> Self {
        Self {
            unit,
            cache_path: default_cache_path(),
            output_path: default_output_path(),
            keychain: false,
            timeout_secs: None,
        }
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;

        info!(path = %path.display(), unit = config.unit, "Loaded configuration");
        Ok(config)
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, StoreError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Returns the request timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_yaml("unit: 12345\n").unwrap();
        assert_eq!(config, Config::new(12345));
        assert_eq!(config.cache_path, PathBuf::from("data/membertools_data.json"));
        assert_eq!(config.output_path, PathBuf::from("data/class_members.txt"));
        assert!(!config.keychain);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_full_config() {
        let yaml = "unit: 42\ncache_path: /tmp/c.json\noutput_path: out.txt\nkeychain: true\ntimeout_secs: 30\n";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.unit, 42);
        assert_eq!(config.cache_path, PathBuf::from("/tmp/c.json"));
        assert_eq!(config.output_path, PathBuf::from("out.txt"));
        assert!(config.keychain);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_unit_is_required() {
        let err = Config::from_yaml("keychain: true\n").unwrap_err();
        assert!(matches!(err, StoreError::Yaml(_)));
    }

    #[test]
    fn test_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
        assert!(err.to_string().contains("config.yml"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "unit: 7\n").unwrap();

        assert_eq!(Config::load_from(&path).unwrap().unit, 7);
    }
}
