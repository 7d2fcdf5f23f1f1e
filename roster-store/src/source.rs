//! Cache-or-fetch snapshot acquisition.
//!
//! ```text
//! load cache ──usable──▶ snapshot
//!     │
//!     └─miss/refresh─▶ client creds ─▶ auth chain ─▶ sync ─▶ validate ─▶ save cache ─▶ snapshot
//! ```
//!
//! Client credentials are only resolved on a miss, so a warm cache needs no
//! secrets at all. A cached document without the snapshot shape counts as a
//! miss, and a fetched one is rejected before it reaches the cache.

use roster_core::MembershipSnapshot;
use roster_fetch::{
    AuthChain, CredentialChain, Endpoints, FetchError, MembershipClient, Transport,
    get_oauth2_client_credentials,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::cache::SnapshotCache;
use crate::error::StoreError;

/// Supplies the membership snapshot for one unit.
pub struct SnapshotSource<'a, T: Transport + ?Sized> {
    cache: SnapshotCache,
    transport: &'a T,
    endpoints: &'a Endpoints,
    unit: u64,
}

impl<'a, T: Transport + ?Sized> SnapshotSource<'a, T> {
    /// Creates a source backed by `cache` that fetches `unit` on a miss.
    pub fn new(cache: SnapshotCache, transport: &'a T, endpoints: &'a Endpoints, unit: u64) -> Self {
        Self {
            cache,
            transport,
            endpoints,
            unit,
        }
    }

    /// Returns the underlying cache.
    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// Returns the cached snapshot, or fetches and caches a fresh one.
    ///
    /// With `refresh` the cache is not read. `oauth` resolves the client
    /// credentials and `login` the church username and password.
    #[instrument(skip(self, oauth, login), fields(unit = self.unit))]
    pub async fn acquire(
        &self,
        refresh: bool,
        oauth: &CredentialChain,
        login: &CredentialChain,
    ) -> Result<Value, StoreError> {
        if !refresh {
            let cached = self.cache.load().await?;
            if SnapshotCache::is_usable(&cached) {
                info!("Using cached snapshot");
                return Ok(cached);
            }
        }

        let client = get_oauth2_client_credentials(oauth).map_err(FetchError::from)?;
        let session = AuthChain::new(self.transport, self.endpoints)
            .establish(&client, login)
            .await?;
        let snapshot = MembershipClient::new(self.transport, self.endpoints)
            .fetch(self.unit, &session)
            .await?;

        let parsed = MembershipSnapshot::from_value(&snapshot)?;
        info!(
            organizations = parsed.organizations.len(),
            members = parsed.member_count(),
            "Fetched snapshot"
        );

        self.cache.save(&snapshot).await?;
        Ok(snapshot)
    }
}
