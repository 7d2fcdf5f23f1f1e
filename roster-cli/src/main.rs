// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! class-roster - class membership lists from member-tools.
//!
//! # Examples
//!
//! ```bash
//! # Prompt for organization and class, write data/class_members.txt
//! class-roster
//!
//! # Whole organization, no prompts for the selector
//! class-roster run --organization "Elders Quorum"
//!
//! # One class, ignoring the cached snapshot
//! class-roster run --organization Primary --class "Valiant 9" --refresh
//!
//! # Cache housekeeping
//! class-roster cache path
//! class-roster cache clear
//!
//! # Keychain entries (used when `keychain: true` in config.yml)
//! class-roster keychain store password
//! ```

mod commands;
mod prompt;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{cache, keychain, run};
use roster_store::default_config_path;

// ============================================================================
// CLI Definition
// ============================================================================

/// class-roster - class membership lists from member-tools.
#[derive(Parser)]
#[command(name = "class-roster")]
#[command(about = "Write the member list of a ward class or organization")]
#[command(long_about = r#"
class-roster syncs a unit's membership from member-tools and writes the
preferred names of one class (or a whole organization) to a text file,
one name per line, sorted by display name.

The snapshot is cached; later runs read the cache until it is cleared.

Credentials:
  CHURCH_CLASS_USERNAME / CHURCH_CLASS_PASSWORD         (else keychain, else prompt)
  CHURCH_CLASS_OAUTH_CLIENT_ID / ..._CLIENT_SECRET      (else keychain, else error)

Examples:
  class-roster                                  # Prompt for the selector
  class-roster run --organization Primary       # Whole organization
  class-roster run -o Primary -c "CTR 7"        # One class
  class-roster cache clear                      # Force a fresh sync next run
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'run' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yml.
    #[arg(long, global = true, default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (no log output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Write the class roster (default if no command specified).
    Run(run::RunArgs),

    /// Inspect or clear the snapshot cache.
    Cache(cache::CacheArgs),

    /// Manage credentials in the system keychain.
    Keychain(keychain::KeychainArgs),
}

/// Exit status for any fatal error.
const EXIT_FAILURE: i32 = 1;

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("class_roster=debug,roster=debug,info")
        } else {
            EnvFilter::new("class_roster=warn,roster=warn")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Run(args)) => run::run(args, &cli).await,
        Some(Commands::Cache(args)) => cache::run(args, &cli).await,
        Some(Commands::Keychain(args)) => keychain::run(args),
        None => run::run(&run::RunArgs::default(), &cli).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(EXIT_FAILURE);
    }

    Ok(())
}
