//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for the authentication chain and membership fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not JSON or lacked a required field.
    #[error("Invalid response from {endpoint}: {source}")]
    InvalidResponse {
        /// Request URL.
        endpoint: String,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// Request URL is outside the allowlist.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Request URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Login material could not be resolved.
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),
}

// ============================================================================
// Credential Error
// ============================================================================

/// Error type for credential resolution.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No source in the chain produced a value.
    #[error("No value for {field}")]
    Missing {
        /// Environment variable naming the field.
        field: String,
    },

    /// The environment variable exists but cannot be read.
    #[error("Cannot read {var}: {reason}")]
    Env {
        /// Environment variable name.
        var: String,
        /// Why it could not be read.
        reason: String,
    },

    /// Keychain access failed.
    #[error("Keychain error: {0}")]
    Keychain(#[from] KeychainError),

    /// Interactive prompt failed.
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

// ============================================================================
// Keychain Error
// ============================================================================

/// Error type for keychain operations.
#[derive(Debug, Error)]
pub enum KeychainError {
    /// Access denied.
    #[error("Access denied to keychain")]
    AccessDenied,

    /// Platform error.
    #[error("Platform error: {0}")]
    Platform(String),

    /// Generic error.
    #[error("Keychain error: {0}")]
    Other(String),
}

impl From<keyring::Error> for KeychainError {
    fn from(err: keyring::Error) -> Self {
        match err {
            keyring::Error::Ambiguous(_) => {
                KeychainError::Other("Ambiguous credential entry".to_string())
            }
            keyring::Error::PlatformFailure(e) => KeychainError::Platform(e.to_string()),
            keyring::Error::NoStorageAccess(_) => KeychainError::AccessDenied,
            _ => KeychainError::Other(err.to_string()),
        }
    }
}
