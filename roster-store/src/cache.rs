//! Membership snapshot cache.
//!
//! The cache is the raw sync response, stored pretty-printed. There is no
//! expiry: a document that parses as a snapshot is used as-is until cleared
//! or refreshed.

use roster_core::MembershipSnapshot;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::error::StoreError;
use crate::persistence::{load_json, save_json};

/// File-backed snapshot cache.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    /// Creates a cache at `path`. Nothing is read until [`load`](Self::load).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached document.
    ///
    /// A missing file yields an empty JSON object. Unreadable or malformed
    /// files are errors.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> Result<Value, StoreError> {
        match load_json(&self.path).await {
            Ok(value) => Ok(value),
            Err(e) if e.is_not_found() => {
                debug!("No snapshot cache");
                Ok(Value::Object(Map::new()))
            }
            Err(e) => Err(e),
        }
    }

    /// Replaces the cached document.
    #[instrument(skip(self, snapshot), fields(path = %self.path.display()))]
    pub async fn save(&self, snapshot: &Value) -> Result<(), StoreError> {
        save_json(&self.path, snapshot).await?;
        info!("Snapshot cached");
        Ok(())
    }

    /// Returns true if `snapshot` can be served without refetching.
    ///
    /// An empty object or a document without the snapshot shape is a miss.
    pub fn is_usable(snapshot: &Value) -> bool {
        snapshot.as_object().is_some_and(|map| !map.is_empty())
            && MembershipSnapshot::from_value(snapshot).is_ok()
    }

    /// Deletes the cache file. A missing file is not an error.
    pub async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!(path = %self.path.display(), "Snapshot cache cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
