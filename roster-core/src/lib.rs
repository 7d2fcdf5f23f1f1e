// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Class Roster Core
//!
//! Core types and the roster query engine for class-roster.
//!
//! This crate has no I/O. It provides:
//!
//! - Domain models (login material, class selector, snapshot records)
//! - Error types
//! - The roster query: organization lookup, class resolution, and
//!   household flattening, filtering, and ordering
//!
//! ## Key Types
//!
//! - [`MembershipSnapshot`] - Typed view of the member-tools sync document
//! - [`ClassSelector`] - Organization and optional class to list
//! - [`Credentials`] / [`OAuth2ClientCredentials`] - Login material
//! - [`CoreError`] - Lookup and shape failures

pub mod error;
pub mod models;
pub mod roster;

pub use error::CoreError;

pub use models::{
    // Login material
    ClassSelector,
    Credentials,
    OAuth2ClientCredentials,
    // Snapshot records
    ChildOrg,
    Household,
    Member,
    MembershipSnapshot,
    Organization,
};

pub use roster::{class_roster, find_organization, members_in, resolve_target_uuid, select_members};
