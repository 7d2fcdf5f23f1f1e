// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Class Roster Store
//!
//! Local state for class-roster.
//!
//! This crate provides:
//!
//! - **Config**: `config.yml` loading
//! - **SnapshotCache**: the raw membership snapshot on disk
//! - **SnapshotSource**: cache-or-fetch acquisition of the snapshot
//! - **RosterWriter**: the class roster output file
//! - **Persistence**: File I/O helpers for JSON and text data
//!
//! ## Usage
//!
//! ```ignore
//! use roster_store::{Config, RosterWriter, SnapshotCache, SnapshotSource};
//!
//! let config = Config::load_from(&Config::default_path())?;
//! let source = SnapshotSource::new(
//!     SnapshotCache::new(&config.cache_path),
//!     &transport,
//!     &endpoints,
//!     config.unit,
//! );
//!
//! let snapshot = source.acquire(false, &oauth_chain, &login_chain).await?;
//! RosterWriter::new(&config.output_path)
//!     .publish(&snapshot, &selector)
//!     .await?;
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod output;
pub mod persistence;
pub mod source;

pub use cache::SnapshotCache;
pub use config::Config;
pub use error::StoreError;
pub use output::RosterWriter;
pub use persistence::{
    default_cache_path, default_config_path, default_output_path, load_json, save_json,
    write_lines,
};
pub use source::SnapshotSource;
