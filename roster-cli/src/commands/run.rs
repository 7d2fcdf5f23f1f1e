//! Run command - sync (or read the cache) and write the class roster.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use roster_fetch::{CHURCH_DOMAIN, CredentialChain, Endpoints, HttpTransport, KeychainSource};
use roster_store::{Config, RosterWriter, SnapshotCache, SnapshotSource};
use tracing::{debug, info};

use crate::Cli;
use crate::prompt::{PromptSource, get_class_selector};

/// Arguments for the run command.
#[derive(Args, Default)]
pub struct RunArgs {
    /// Organization name, matched exactly. Prompted for if omitted.
    #[arg(long, short)]
    pub organization: Option<String>,

    /// Class within the organization. Defaults to the whole organization
    /// when --organization is given.
    #[arg(long, short)]
    pub class: Option<String>,

    /// Ignore the cached snapshot and sync again.
    #[arg(long)]
    pub refresh: bool,

    /// Output file (overrides output_path in config).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Runs the run command.
pub async fn run(args: &RunArgs, cli: &Cli) -> Result<()> {
    let config = Config::load_from(&cli.config)?;

    let transport = HttpTransport::with_timeout(config.timeout())?
        .with_allowed_domains(vec![CHURCH_DOMAIN.to_string()]);
    let endpoints = Endpoints::default();
    let source = SnapshotSource::new(
        SnapshotCache::new(&config.cache_path),
        &transport,
        &endpoints,
        config.unit,
    );

    let oauth = oauth_chain(&config);
    let login = login_chain(&config);
    debug!(oauth = ?oauth, login = ?login, "Credential chains");

    let snapshot = source
        .acquire(args.refresh, &oauth, &login)
        .await
        .context("Failed to obtain membership snapshot")?;

    let selector = get_class_selector(args.organization.as_deref(), args.class.as_deref())
        .context("Failed to read organization and class")?;

    let writer = RosterWriter::new(args.output.clone().unwrap_or(config.output_path));
    let names = writer.publish(&snapshot, &selector).await?;

    info!(selector = %selector, count = names.len(), "Roster complete");
    if !cli.quiet {
        println!("Wrote {} names to {}", names.len(), writer.path().display());
    }

    Ok(())
}

/// Sources for the OAuth2 client: environment, then keychain if enabled.
fn oauth_chain(config: &Config) -> CredentialChain {
    let chain = CredentialChain::environment();
    if config.keychain {
        chain.with_source(Box::new(KeychainSource::default()))
    } else {
        chain
    }
}

/// Sources for the church login: as [`oauth_chain`], then the terminal.
fn login_chain(config: &Config) -> CredentialChain {
    oauth_chain(config).with_source(Box::new(PromptSource))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chains_without_keychain() {
        let config = Config::new(1);
        assert_eq!(oauth_chain(&config).source_ids(), vec!["env"]);
        assert_eq!(login_chain(&config).source_ids(), vec!["env", "prompt"]);
    }

    #[test]
    fn test_chains_with_keychain() {
        let config = Config {
            keychain: true,
            ..Config::new(1)
        };
        assert_eq!(oauth_chain(&config).source_ids(), vec!["env", "keychain"]);
        assert_eq!(
            login_chain(&config).source_ids(),
            vec!["env", "keychain", "prompt"]
        );
    }
}
