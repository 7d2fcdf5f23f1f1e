//! Member-tools service URLs.

/// Identity service token endpoint (OAuth2 client-credentials grant).
pub const TOKEN_URL: &str = "https://ident.churchofjesuschrist.org/sso/oauth2/access_token";

/// Mobile login endpoint (bearer token for session cookie).
pub const MOBILE_LOGIN_URL: &str = "https://mobileauth.churchofjesuschrist.org/v1/mobile/login";

/// Membership sync endpoint.
pub const SYNC_URL: &str =
    "https://wam-membertools-api.churchofjesuschrist.org/api/v4/sync?force=true";

/// The three URLs the auth chain and sync fetch talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Token exchange URL.
    pub token: String,
    /// Mobile login URL.
    pub mobile_login: String,
    /// Membership sync URL.
    pub sync: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token: TOKEN_URL.to_string(),
            mobile_login: MOBILE_LOGIN_URL.to_string(),
            sync: SYNC_URL.to_string(),
        }
    }
}
