//! Member-tools authentication chain.
//!
//! The sync API accepts neither the OAuth2 token nor the church login on
//! its own. A session takes three dependent steps:
//!
//! 1. **Token exchange**: client-credentials grant at the identity service,
//!    yielding an `id_token`
//! 2. **Mobile login**: church username/password posted with
//!    `Authorization: Bearer <id_token>`, yielding one cookie `{name, value}`
//! 3. **Session**: the bearer headers plus that cookie
//!
//! Each step's output feeds the next; any failure aborts the chain.

use std::collections::BTreeMap;
use std::fmt;

use roster_core::{Credentials, OAuth2ClientCredentials};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use crate::credentials::{CredentialChain, get_credentials};
use crate::endpoints::Endpoints;
use crate::error::FetchError;
use crate::host::http::{ApiRequest, Transport};

// ============================================================================
// Constants
// ============================================================================

/// OAuth2 grant type for the token exchange.
pub const GRANT_TYPE: &str = "client_credentials";

/// Scopes requested in the token exchange.
pub const SCOPE: &str = "openid profile";

/// Encodings advertised to the mobile login and sync endpoints.
pub const ACCEPT_ENCODING: &str = "gzip, deflate, br";

// ============================================================================
// Response Types
// ============================================================================

/// The part of the token response the chain needs.
#[derive(Deserialize)]
struct TokenResponse {
    id_token: String,
}

/// Session cookie issued by mobile login.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SessionCookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookie")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Parses a JSON body into `T`, tagging failures with the endpoint.
fn parse_response<T: DeserializeOwned>(
    endpoint: &str,
    body: Value,
) -> Result<T, FetchError> {
    serde_json::from_value(body).map_err(|source| FetchError::InvalidResponse {
        endpoint: endpoint.to_string(),
        source,
    })
}

// ============================================================================
// Session
// ============================================================================

/// Headers and cookies that authorize the sync request. One run only.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer authorization and accept-encoding headers.
    pub auth_headers: BTreeMap<String, String>,
    /// The mobile-login session cookie.
    pub cookies: BTreeMap<String, String>,
}

impl Session {
    /// Assembles a session from the bearer headers and the login cookie.
    pub fn new(auth_headers: BTreeMap<String, String>, cookie: SessionCookie) -> Self {
        let mut cookies = BTreeMap::new();
        cookies.insert(cookie.name, cookie.value);
        Self {
            auth_headers,
            cookies,
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("auth_headers", &self.auth_headers.keys().collect::<Vec<_>>())
            .field("cookies", &self.cookies.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Headers that carry the bearer token to mobile login and sync.
pub fn bearer_headers(id_token: &str) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Accept-Encoding".to_string(), ACCEPT_ENCODING.to_string());
    headers.insert("Authorization".to_string(), format!("Bearer {id_token}"));
    headers
}

// ============================================================================
// Auth Chain
// ============================================================================

/// Runs the token exchange and mobile login against a transport.
pub struct AuthChain<'a, T: Transport + ?Sized> {
    transport: &'a T,
    endpoints: &'a Endpoints,
}

impl<'a, T: Transport + ?Sized> AuthChain<'a, T> {
    /// Creates a chain over the given transport and endpoints.
    pub fn new(transport: &'a T, endpoints: &'a Endpoints) -> Self {
        Self {
            transport,
            endpoints,
        }
    }

    /// Exchanges OAuth2 client credentials for an `id_token`.
    #[instrument(skip(self, client), fields(client_id = %client.client_id))]
    pub async fn exchange_token(
        &self,
        client: &OAuth2ClientCredentials,
    ) -> Result<String, FetchError> {
        let form = vec![
            ("grant_type".to_string(), GRANT_TYPE.to_string()),
            ("client_id".to_string(), client.client_id.clone()),
            ("client_secret".to_string(), client.client_secret.clone()),
            ("scope".to_string(), SCOPE.to_string()),
        ];

        let body = self
            .transport
            .post(ApiRequest::form(&self.endpoints.token, form))
            .await?;
        let token: TokenResponse = parse_response(&self.endpoints.token, body)?;

        debug!("Received id_token");
        Ok(token.id_token)
    }

    /// Trades the bearer headers and church login for a session cookie.
    #[instrument(skip(self, headers, credentials), fields(username = %credentials.username))]
    pub async fn mobile_login(
        &self,
        headers: &BTreeMap<String, String>,
        credentials: &Credentials,
    ) -> Result<SessionCookie, FetchError> {
        let body = json!({
            "username": credentials.username,
            "password": credentials.password,
        });

        let body = self
            .transport
            .post(ApiRequest::json(&self.endpoints.mobile_login, body).with_headers(headers))
            .await?;
        let cookie: SessionCookie = parse_response(&self.endpoints.mobile_login, body)?;

        debug!(cookie = %cookie.name, "Received session cookie");
        Ok(cookie)
    }

    /// Runs all three steps.
    ///
    /// The church login is resolved from `login` only after the token
    /// exchange succeeds, so a bad client configuration never prompts.
    pub async fn establish(
        &self,
        client: &OAuth2ClientCredentials,
        login: &CredentialChain,
    ) -> Result<Session, FetchError> {
        let id_token = self.exchange_token(client).await?;
        let headers = bearer_headers(&id_token);

        let credentials = get_credentials(login)?;
        let cookie = self.mobile_login(&headers, &credentials).await?;

        info!("Member-tools session established");
        Ok(Session::new(headers, cookie))
    }
}

// ============================================================================
// Tests
// ============================================================================
