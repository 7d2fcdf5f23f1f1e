//! Store error types.

use roster_core::CoreError;
use roster_fetch::FetchError;
use thiserror::Error;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file is not valid YAML or lacks a required key.
    #[error("Invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Authentication or membership fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Snapshot could not be interpreted.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Returns true if the cache file was missing rather than unreadable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
