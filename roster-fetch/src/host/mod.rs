//! Host APIs for class-roster.
//!
//! - [`http`] - HTTP transport with tracing and domain allowlist
//! - [`keychain`] - System keychain access for stored login material

pub mod http;
pub mod keychain;

pub use http::{ApiRequest, CHURCH_DOMAIN, HttpTransport, RequestBody, Transport};
pub use keychain::KeychainStore;
