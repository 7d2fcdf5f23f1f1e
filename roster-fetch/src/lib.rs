// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Class Roster Fetch
//!
//! Network side of class-roster: the HTTP transport, login material
//! resolution, the member-tools authentication chain, and the membership
//! sync fetch.
//!
//! ## Host APIs
//!
//! - [`host::http`] - [`Transport`] trait and the reqwest-backed [`HttpTransport`]
//! - [`host::keychain`] - System keychain access
//!
//! ## Member-tools
//!
//! - [`credentials`] - [`CredentialChain`] of env, keychain, and prompt sources
//! - [`auth`] - [`AuthChain`]: token exchange, mobile login, [`Session`]
//! - [`sync`] - [`MembershipClient`]: the raw snapshot fetch
//!
//! ## Example
//!
//! ```ignore
//! use roster_fetch::{AuthChain, CredentialChain, Endpoints, HttpTransport, MembershipClient};
//!
//! let transport = HttpTransport::new()?;
//! let endpoints = Endpoints::default();
//! let client = roster_fetch::get_oauth2_client_credentials(&CredentialChain::environment())?;
//!
//! let session = AuthChain::new(&transport, &endpoints)
//!     .establish(&client, &CredentialChain::environment())
//!     .await?;
//! let snapshot = MembershipClient::new(&transport, &endpoints)
//!     .fetch(12345, &session)
//!     .await?;
//! ```

pub mod auth;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod host;
pub mod sync;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;

// Errors
pub use error::{CredentialError, FetchError, KeychainError};

// Host APIs
pub use host::{
    http::{ApiRequest, CHURCH_DOMAIN, HttpTransport, RequestBody, Transport},
    keychain::KeychainStore,
};

// Member-tools
pub use auth::{AuthChain, Session, SessionCookie, bearer_headers};
pub use credentials::{
    CredentialChain, EnvSource, KeychainSource, SecretField, SecretSource, fields,
    get_credentials, get_oauth2_client_credentials,
};
pub use endpoints::Endpoints;
pub use sync::{MembershipClient, SyncRequest};

#[cfg(any(test, feature = "test-util"))]
pub use mock::MockTransport;
