//! Login material resolution.
//!
//! Each value the tool needs is a [`SecretField`]. A [`CredentialChain`]
//! asks its sources for a field in order and takes the first answer:
//!
//! 1. **Environment** - `CHURCH_CLASS_*` variables
//! 2. **Keychain** - opt-in, service `class-roster`
//! 3. **Prompt** - interactive, supplied by the CLI (user login only)
//!
//! A source that has nothing for a field returns `Ok(None)` and the chain
//! moves on. Any other failure stops resolution.

use std::env::VarError;

use roster_core::{Credentials, OAuth2ClientCredentials};
use tracing::{debug, instrument};

use crate::error::CredentialError;
use crate::host::keychain::{KeychainStore, accounts};

// ============================================================================
// Fields
// ============================================================================

/// One resolvable login value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretField {
    /// Environment variable holding the value.
    pub env_var: &'static str,
    /// Label shown when prompting.
    pub prompt: &'static str,
    /// Keychain account holding the value.
    pub account: &'static str,
    /// Whether prompts must hide input.
    pub secret: bool,
}

/// The four login fields.
pub mod fields {
    use super::{SecretField, accounts};

    /// Church account username.
    pub const USERNAME: SecretField = SecretField {
        env_var: "CHURCH_CLASS_USERNAME",
        prompt: "Username",
        account: accounts::USERNAME,
        secret: false,
    };

    /// Church account password.
    pub const PASSWORD: SecretField = SecretField {
        env_var: "CHURCH_CLASS_PASSWORD",
        prompt: "Password",
        account: accounts::PASSWORD,
        secret: true,
    };

    /// OAuth2 client id.
    pub const OAUTH_CLIENT_ID: SecretField = SecretField {
        env_var: "CHURCH_CLASS_OAUTH_CLIENT_ID",
        prompt: "OAuth client id",
        account: accounts::OAUTH_CLIENT_ID,
        secret: false,
    };

    /// OAuth2 client secret.
    pub const OAUTH_CLIENT_SECRET: SecretField = SecretField {
        env_var: "CHURCH_CLASS_OAUTH_CLIENT_SECRET",
        prompt: "OAuth client secret",
        account: accounts::OAUTH_CLIENT_SECRET,
        secret: true,
    };
}

// ============================================================================
// Sources
// ============================================================================

/// A place login values can come from.
pub trait SecretSource: Send + Sync {
    /// Short identifier used in logs (e.g., "env", "keychain").
    fn id(&self) -> &str;

    /// Returns the field's value, or `None` if this source does not have it.
    fn lookup(&self, field: &SecretField) -> Result<Option<String>, CredentialError>;
}

/// Reads fields from environment variables.
#[derive(Clone, Copy)]
pub struct EnvSource {
    read: fn(&str) -> Result<String, VarError>,
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvSource {
    /// Creates a source backed by the process environment.
    pub fn new() -> Self {
        Self {
            read: |key| std::env::var(key),
        }
    }

    /// Creates a source backed by a custom lookup function.
    pub fn with_reader(read: fn(&str) -> Result<String, VarError>) -> Self {
        Self { read }
    }
}

impl std::fmt::Debug for EnvSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EnvSource")
    }
}

impl SecretSource for EnvSource {
    fn id(&self) -> &str {
        "env"
    }

    fn lookup(&self, field: &SecretField) -> Result<Option<String>, CredentialError> {
        match (self.read)(field.env_var) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(e @ VarError::NotUnicode(_)) => Err(CredentialError::Env {
                var: field.env_var.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Reads fields from the system keychain.
#[derive(Debug, Clone, Default)]
pub struct KeychainSource {
    store: KeychainStore,
}

impl KeychainSource {
    /// Creates a source over the given keychain store.
    pub fn new(store: KeychainStore) -> Self {
        Self { store }
    }
}

impl SecretSource for KeychainSource {
    fn id(&self) -> &str {
        "keychain"
    }

    fn lookup(&self, field: &SecretField) -> Result<Option<String>, CredentialError> {
        Ok(self.store.get(field.account)?)
    }
}

// ============================================================================
// Chain
// ============================================================================

/// Ordered list of sources; the first source with a value wins.
#[derive(Default)]
pub struct CredentialChain {
    sources: Vec<Box<dyn SecretSource>>,
}

impl CredentialChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chain that only reads the environment.
    pub fn environment() -> Self {
        Self::new().with_source(Box::new(EnvSource::new()))
    }

    /// Appends a source, tried after all existing ones.
    #[must_use]
    pub fn with_source(mut self, source: Box<dyn SecretSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Returns the source ids in resolution order.
    pub fn source_ids(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.id()).collect()
    }

    /// Resolves one field.
    pub fn resolve(&self, field: &SecretField) -> Result<String, CredentialError> {
        for source in &self.sources {
            if let Some(value) = source.lookup(field)? {
                debug!(field = field.env_var, source = source.id(), "Resolved credential");
                return Ok(value);
            }
        }

        Err(CredentialError::Missing {
            field: field.env_var.to_string(),
        })
    }
}

impl std::fmt::Debug for CredentialChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialChain")
            .field("sources", &self.source_ids())
            .finish()
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolves the operator's church account login.
#[instrument(skip(chain))]
pub fn get_credentials(chain: &CredentialChain) -> Result<Credentials, CredentialError> {
    let username = chain.resolve(&fields::USERNAME)?;
    let password = chain.resolve(&fields::PASSWORD)?;
    Ok(Credentials::new(username, password))
}

/// Resolves the OAuth2 client registered with the identity service.
#[instrument(skip(chain))]
pub fn get_oauth2_client_credentials(
    chain: &CredentialChain,
) -> Result<OAuth2ClientCredentials, CredentialError> {
    let client_id = chain.resolve(&fields::OAUTH_CLIENT_ID)?;
    let client_secret = chain.resolve(&fields::OAUTH_CLIENT_SECRET)?;
    Ok(OAuth2ClientCredentials::new(client_id, client_secret))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// In-memory source for chain tests.
    struct MapSource {
        id: &'static str,
        values: HashMap<&'static str, &'static str>,
    }

    impl MapSource {
        fn boxed(id: &'static str, values: &[(&'static str, &'static str)]) -> Box<Self> {
            Box::new(Self {
                id,
                values: values.iter().copied().collect(),
            })
        }
    }

    impl SecretSource for MapSource {
        fn id(&self) -> &str {
            self.id
        }

        fn lookup(&self, field: &SecretField) -> Result<Option<String>, CredentialError> {
            Ok(self.values.get(field.env_var).map(|v| (*v).to_string()))
        }
    }

    struct FailingSource;

    impl SecretSource for FailingSource {
        fn id(&self) -> &str {
            "failing"
        }

        fn lookup(&self, _field: &SecretField) -> Result<Option<String>, CredentialError> {
            Err(CredentialError::Prompt("not a terminal".to_string()))
        }
    }

    #[test]
    fn test_first_source_wins() {
        let chain = CredentialChain::new()
            .with_source(MapSource::boxed("a", &[("CHURCH_CLASS_USERNAME", "from-a")]))
            .with_source(MapSource::boxed("b", &[("CHURCH_CLASS_USERNAME", "from-b")]));

        assert_eq!(chain.resolve(&fields::USERNAME).unwrap(), "from-a");
    }

    #[test]
    fn test_fields_resolve_independently() {
        let chain = CredentialChain::new()
            .with_source(MapSource::boxed("env", &[("CHURCH_CLASS_USERNAME", "jdoe")]))
            .with_source(MapSource::boxed("prompt", &[("CHURCH_CLASS_PASSWORD", "pw")]));

        let creds = get_credentials(&chain).unwrap();
        assert_eq!(creds, Credentials::new("jdoe", "pw"));
    }

    #[test]
    fn test_missing_field_is_fatal() {
        let chain = CredentialChain::new().with_source(MapSource::boxed(
            "env",
            &[("CHURCH_CLASS_OAUTH_CLIENT_ID", "id")],
        ));

        let err = get_oauth2_client_credentials(&chain).unwrap_err();
        assert!(
            matches!(err, CredentialError::Missing { ref field } if field == "CHURCH_CLASS_OAUTH_CLIENT_SECRET")
        );
    }

    #[test]
    fn test_source_error_stops_resolution() {
        let chain = CredentialChain::new()
            .with_source(Box::new(FailingSource))
            .with_source(MapSource::boxed("later", &[("CHURCH_CLASS_USERNAME", "x")]));

        assert!(matches!(
            chain.resolve(&fields::USERNAME),
            Err(CredentialError::Prompt(_))
        ));
    }

    #[test]
    fn test_env_source_missing_variable() {
        let source = EnvSource::with_reader(|_| Err(VarError::NotPresent));
        assert_eq!(source.lookup(&fields::PASSWORD).unwrap(), None);
    }

    #[test]
    fn test_env_source_reads_variable() {
        let source = EnvSource::with_reader(|key| {
            if key == "CHURCH_CLASS_OAUTH_CLIENT_ID" {
                Ok("client".to_string())
            } else {
                Err(VarError::NotPresent)
            }
        });
        assert_eq!(
            source.lookup(&fields::OAUTH_CLIENT_ID).unwrap().as_deref(),
            Some("client")
        );
    }

    #[test]
    fn test_env_source_non_unicode_is_fatal() {
        let source = EnvSource::with_reader(|_| {
            Err(VarError::NotUnicode(std::ffi::OsString::from("bad")))
        });
        assert!(matches!(
            source.lookup(&fields::USERNAME),
            Err(CredentialError::Env { .. })
        ));
    }

    #[test]
    fn test_empty_chain_reports_missing() {
        assert!(matches!(
            CredentialChain::new().resolve(&fields::USERNAME),
            Err(CredentialError::Missing { .. })
        ));
    }


    #[test]
    fn test_chain_debug_lists_sources() {
        let chain = CredentialChain::environment();
        assert_eq!(chain.source_ids(), vec!["env"]);
        assert!(format!("{chain:?}").contains("env"));
    }
}
