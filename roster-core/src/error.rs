//! Core error types for class-roster.

use thiserror::Error;

/// Errors raised while interpreting a membership snapshot.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No organization carries the requested name.
    #[error("Organization not found: {0}")]
    OrganizationNotFound(String),

    /// More than one organization carries the requested name.
    #[error("Organization name is ambiguous: {name} ({count} matches)")]
    AmbiguousOrganization {
        /// Requested organization name.
        name: String,
        /// Number of organizations with that name.
        count: usize,
    },

    /// No class under the organization carries the requested name.
    #[error("Class not found in {organization}: {class}")]
    ClassNotFound {
        /// Organization that was searched.
        organization: String,
        /// Requested class name.
        class: String,
    },

    /// More than one class under the organization carries the requested name.
    #[error("Class name is ambiguous in {organization}: {class} ({count} matches)")]
    AmbiguousClass {
        /// Organization that was searched.
        organization: String,
        /// Requested class name.
        class: String,
        /// Number of classes with that name.
        count: usize,
    },

    /// The snapshot document does not have the expected shape.
    #[error("Invalid membership snapshot: {0}")]
    InvalidSnapshot(#[from] serde_json::Error),
}

impl CoreError {
    /// Returns true for organization and class lookup failures.
    pub fn is_lookup(&self) -> bool {
        !matches!(self, CoreError::InvalidSnapshot(_))
    }
}
