//! Cache command - inspect or clear the snapshot cache.

use anyhow::Result;
use clap::{Args, Subcommand};
use roster_store::{Config, SnapshotCache};

use crate::Cli;

/// Arguments for the cache command.
#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands.
#[derive(Subcommand)]
pub enum CacheAction {
    /// Show the cache file path.
    Path,

    /// Delete the cached snapshot so the next run syncs again.
    Clear,
}

/// Runs the cache command.
pub async fn run(args: &CacheArgs, cli: &Cli) -> Result<()> {
    let config = Config::load_from(&cli.config)?;
    let cache = SnapshotCache::new(&config.cache_path);

    match args.action {
        CacheAction::Path => println!("{}", cache.path().display()),
        CacheAction::Clear => {
            cache.clear().await?;
            if !cli.quiet {
                println!("Cleared {}", cache.path().display());
            }
        }
    }

    Ok(())
}
