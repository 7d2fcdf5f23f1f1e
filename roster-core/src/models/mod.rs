//! Domain models for class-roster.
//!
//! ## Submodules
//!
//! - [`credentials`] - Login material and the class selector
//! - [`snapshot`] - Typed records of the membership sync document

mod credentials;
mod snapshot;

pub use credentials::{ClassSelector, Credentials, OAuth2ClientCredentials};
pub use snapshot::{ChildOrg, Household, Member, MembershipSnapshot, Organization};

#[cfg(test)]
mod serde_tests;
