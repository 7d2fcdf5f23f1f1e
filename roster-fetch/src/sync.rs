//! Membership sync fetch.
//!
//! # Request
//!
//! ```text
//! POST /api/v4/sync?force=true
//! Authorization: Bearer <id_token>
//! Cookie: <session cookie>
//!
//! [{"types": ["HOUSEHOLDS", "ORGANIZATIONS"], "unitNumbers": [12345]}]
//! ```
//!
//! The response is the raw snapshot document. It is returned untouched so
//! the cache keeps every upstream field.

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::auth::Session;
use crate::endpoints::Endpoints;
use crate::error::FetchError;
use crate::host::http::{ApiRequest, Transport};

/// Record types requested from the sync endpoint.
pub const SYNC_TYPES: [&str; 2] = ["HOUSEHOLDS", "ORGANIZATIONS"];

/// One entry of the sync request array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    /// Record types to include.
    pub types: Vec<String>,
    /// Units to sync.
    pub unit_numbers: Vec<u64>,
}

impl SyncRequest {
    /// Households and organizations for one unit.
    pub fn for_unit(unit: u64) -> Self {
        Self {
            types: SYNC_TYPES.iter().map(ToString::to_string).collect(),
            unit_numbers: vec![unit],
        }
    }
}

/// Fetches membership snapshots with an established session.
pub struct MembershipClient<'a, T: Transport + ?Sized> {
    transport: &'a T,
    endpoints: &'a Endpoints,
}

impl<'a, T: Transport + ?Sized> MembershipClient<'a, T> {
    /// Creates a client over the given transport and endpoints.
    pub fn new(transport: &'a T, endpoints: &'a Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Fetches the raw snapshot document for `unit`.
    #[instrument(skip(self, session))]
    pub async fn fetch(&self, unit: u64, session: &Session) -> Result<Value, FetchError> {
        let request = ApiRequest::json(&self.endpoints.sync, json!([SyncRequest::for_unit(unit)]))
            .with_headers(&session.auth_headers)
            .with_cookies(&session.cookies);

        let snapshot = self.transport.post(request).await?;
        info!("Fetched membership snapshot");
        Ok(snapshot)
    }
}

// ============================================================================
// Tests
// ============================================================================
