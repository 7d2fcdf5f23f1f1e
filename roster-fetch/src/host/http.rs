//! HTTP transport with tracing and domain allowlist.
//!
//! Every member-tools exchange is a POST whose response body is JSON. The
//! [`Transport`] trait captures exactly that so the auth chain and the sync
//! fetch can run against a recording mock in tests.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;

/// User agent string for class-roster.
const USER_AGENT: &str = concat!("class-roster/", env!("CARGO_PKG_VERSION"));

/// Domain every member-tools endpoint lives under.
pub const CHURCH_DOMAIN: &str = "churchofjesuschrist.org";

// ============================================================================
// Request
// ============================================================================

/// Body of an outgoing request.
#[derive(Clone, PartialEq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` fields, in order.
    Form(Vec<(String, String)>),
    /// JSON document.
    Json(Value),
}

/// A POST request to a member-tools endpoint.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    /// Absolute URL.
    pub url: String,
    /// Extra request headers.
    pub headers: BTreeMap<String, String>,
    /// Cookies sent in a single `Cookie` header.
    pub cookies: BTreeMap<String, String>,
    /// Request body.
    pub body: RequestBody,
}

impl ApiRequest {
    /// Creates a form-encoded POST.
    pub fn form(url: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
            body: RequestBody::Form(fields),
        }
    }

    /// Creates a JSON POST.
    pub fn json(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
            body: RequestBody::Json(body),
        }
    }

    /// Adds headers to the request.
    #[must_use]
    pub fn with_headers(mut self, headers: &BTreeMap<String, String>) -> Self {
        self.headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Adds cookies to the request.
    #[must_use]
    pub fn with_cookies(mut self, cookies: &BTreeMap<String, String>) -> Self {
        self.cookies
            .extend(cookies.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Renders the cookies as a `Cookie` header value.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

// Bodies and header values carry passwords and tokens; only names are shown.
impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Form(fields) => f
                .debug_tuple("Form")
                .field(&fields.iter().map(|(name, _)| name).collect::<Vec<_>>())
                .finish(),
            RequestBody::Json(_) => f.write_str("Json(..)"),
        }
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("url", &self.url)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .field("cookies", &self.cookies.keys().collect::<Vec<_>>())
            .field("body", &self.body)
            .finish()
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Performs a request and returns the parsed JSON body.
///
/// Implementations fail on transport errors, non-success statuses, and
/// bodies that are not JSON. No retries.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a POST and parses the response body as JSON.
    async fn post(&self, request: ApiRequest) -> Result<Value, FetchError>;
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// reqwest-backed transport with an optional domain allowlist.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpTransport {
    /// Creates a transport with reqwest's default timeout behaviour.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(None)
    }

    /// Creates a transport with an optional whole-request timeout.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: builder.build()?,
            allowed_domains: None,
        })
    }

    /// Restricts requests to the given domains and their subdomains.
    #[must_use]
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), FetchError> {
        let Some(ref allowed) = self.allowed_domains else {
            return Ok(());
        };

        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| FetchError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(FetchError::DomainNotAllowed(host.to_string()))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn post(&self, request: ApiRequest) -> Result<Value, FetchError> {
        self.is_domain_allowed(&request.url)?;
        debug!("POST request");

        let mut builder = self.inner.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(cookie) = request.cookie_header() {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder = match &request.body {
            RequestBody::Form(fields) => builder.form(fields),
            RequestBody::Json(body) => builder.json(body),
        };

        let response = builder.send().await?;
        let status = response.status();
        debug!(status = %status, "Response received");

        if !status.is_success() {
            return Err(FetchError::Status {
                url: request.url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| FetchError::InvalidResponse {
            endpoint: request.url,
            source,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
