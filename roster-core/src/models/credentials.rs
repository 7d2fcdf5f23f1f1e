//! Login material and the operator's class selection.
//!
//! None of these types are ever persisted. Their `Debug` output redacts
//! secrets so they can travel through `tracing` fields safely.

use std::fmt;

/// Placeholder printed instead of secret values.
const REDACTED: &str = "<redacted>";

// ============================================================================
// User Credentials
// ============================================================================

/// Member-tools login for the operator.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Church account username.
    pub username: String,
    /// Church account password.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

// ============================================================================
// OAuth2 Client Credentials
// ============================================================================

/// OAuth2 client registered with the identity service.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuth2ClientCredentials {
    /// OAuth2 client id.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
}

impl OAuth2ClientCredentials {
    /// Creates a client credential pair.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for OAuth2ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &REDACTED)
            .finish()
    }
}

// ============================================================================
// Class Selector
// ============================================================================

/// Which organization, and optionally which class within it, to list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSelector {
    /// Organization name, matched exactly.
    pub organization: String,
    /// Class name within the organization. Empty selects the organization itself.
    pub class: String,
}

impl ClassSelector {
    /// Creates a selector for a class within an organization.
    pub fn new(organization: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            class: class.into(),
        }
    }

    /// Creates a selector for every member of an organization.
    pub fn organization(organization: impl Into<String>) -> Self {
        Self::new(organization, String::new())
    }

    /// Returns true when the selector targets the organization itself.
    pub fn targets_organization(&self) -> bool {
        self.class.is_empty()
    }
}

impl fmt::Display for ClassSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.targets_organization() {
            write!(f, "{}", self.organization)
        } else {
            write!(f, "{} / {}", self.organization, self.class)
        }
    }
}
