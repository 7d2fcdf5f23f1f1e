//! CLI command implementations.

pub mod cache;
pub mod keychain;
pub mod run;
