//! Roster output file.

use roster_core::{ClassSelector, MembershipSnapshot, class_roster};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::error::StoreError;
use crate::persistence::write_lines;

/// Writes the computed roster, one preferred name per line.
#[derive(Debug, Clone)]
pub struct RosterWriter {
    path: PathBuf,
}

impl RosterWriter {
    /// Creates a writer targeting `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the output file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the output file with `names`.
    pub async fn write(&self, names: &[String]) -> Result<(), StoreError> {
        write_lines(&self.path, names).await?;
        info!(path = %self.path.display(), count = names.len(), "Wrote class roster");
        Ok(())
    }

    /// Computes the roster for `selector` from a raw snapshot, then writes it.
    ///
    /// The file is only touched once the whole roster has been computed, so
    /// a lookup failure leaves any previous output in place.
    #[instrument(skip(self, snapshot, selector), fields(selector = %selector))]
    pub async fn publish(
        &self,
        snapshot: &Value,
        selector: &ClassSelector,
    ) -> Result<Vec<String>, StoreError> {
        let snapshot = MembershipSnapshot::from_value(snapshot)?;
        let names = class_roster(&snapshot, selector)?;
        self.write(&names).await?;
        Ok(names)
    }
}
