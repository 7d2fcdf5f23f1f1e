//! Credential storage using the system keychain.
//!
//! This module provides access to the system's secure credential storage:
//! - macOS: Keychain Services
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KDE Wallet)
//!
//! Entries live under one service name with one account per login field
//! (see [`accounts`]).

use keyring::Entry;
use tracing::{debug, warn};

use crate::error::KeychainError;

/// Service name for class-roster credentials.
pub const SERVICE: &str = "class-roster";

/// Keychain account names for each login field.
pub mod accounts {
    /// Church account username.
    pub const USERNAME: &str = "username";
    /// Church account password.
    pub const PASSWORD: &str = "password";
    /// OAuth2 client id.
    pub const OAUTH_CLIENT_ID: &str = "oauth_client_id";
    /// OAuth2 client secret.
    pub const OAUTH_CLIENT_SECRET: &str = "oauth_client_secret";
}

// ============================================================================
// Keychain Store
// ============================================================================

/// Synchronous access to class-roster's keychain entries.
#[derive(Debug, Clone)]
pub struct KeychainStore {
    service: String,
}

impl Default for KeychainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeychainStore {
    /// Creates a store for the default service.
    pub fn new() -> Self {
        Self::with_service(SERVICE)
    }

    /// Creates a store for a custom service name.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Returns the service name.
    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry(&self, account: &str) -> Result<Entry, KeychainError> {
        Entry::new(&self.service, account).map_err(|e| KeychainError::Platform(e.to_string()))
    }

    /// Reads an account. Missing and empty entries are `None`.
    pub fn get(&self, account: &str) -> Result<Option<String>, KeychainError> {
        match self.entry(account)?.get_password() {
            Ok(secret) if !secret.is_empty() => {
                debug!(service = %self.service, account = %account, "Credential found");
                Ok(Some(secret))
            }
            Ok(_) | Err(keyring::Error::NoEntry) => {
                debug!(service = %self.service, account = %account, "Credential not found");
                Ok(None)
            }
            Err(e) => {
                warn!(service = %self.service, account = %account, error = %e, "Failed to get credential");
                Err(e.into())
            }
        }
    }

    /// Stores an account, replacing any existing value.
    pub fn set(&self, account: &str, secret: &str) -> Result<(), KeychainError> {
        self.entry(account)?.set_password(secret).map_err(|e| {
            warn!(service = %self.service, account = %account, error = %e, "Failed to set credential");
            KeychainError::from(e)
        })?;

        debug!(service = %self.service, account = %account, "Credential stored");
        Ok(())
    }

    /// Deletes an account. A missing entry is not an error.
    pub fn delete(&self, account: &str) -> Result<(), KeychainError> {
        match self.entry(account)?.delete_credential() {
            Ok(()) => {
                debug!(service = %self.service, account = %account, "Credential deleted");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
