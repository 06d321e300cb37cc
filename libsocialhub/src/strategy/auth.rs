//! Authentication strategies
//!
//! These model the shape of each flow (which credential fields are required,
//! what becomes the active token, how refresh behaves). They do not talk to
//! any identity provider.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::types::Credentials;

/// Authentication behaviour injected into an adapter
///
/// A failed authentication is a normal outcome: `authenticate` returns
/// `false` and leaves the strategy unauthenticated. It never errors.
pub trait AuthStrategy: Send + Sync {
    /// Validate the credentials and store the active token on success
    fn authenticate(&mut self, credentials: &Credentials) -> bool;

    /// Produce a new active token
    fn refresh(&mut self, refresh_token: &str) -> String;

    /// True only when authentication succeeded and the active token is non-empty
    fn is_authenticated(&self) -> bool;

    /// Short identifier (`apikey`, `oauth2`, `jwt`)
    fn name(&self) -> &str;
}

/// Key-based authentication
///
/// Requires a non-empty API key. Keys do not expire, so refreshing hands back
/// the stored key.
#[derive(Debug, Default)]
pub struct ApiKeyAuth {
    authenticated: bool,
    active_key: String,
}

impl ApiKeyAuth {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthStrategy for ApiKeyAuth {
    fn authenticate(&mut self, credentials: &Credentials) -> bool {
        debug!(account = %credentials.account, "Authenticating via API key");

        if credentials.api_key.is_empty() {
            warn!(account = %credentials.account, "API key authentication failed: API key is empty");
            self.authenticated = false;
            self.active_key.clear();
            return false;
        }

        self.active_key = credentials.api_key.clone();
        self.authenticated = true;
        info!(account = %credentials.account, "API key authentication succeeded");
        true
    }

    fn refresh(&mut self, _refresh_token: &str) -> String {
        debug!("API keys do not expire, returning the active key");
        self.active_key.clone()
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated && !self.active_key.is_empty()
    }

    fn name(&self) -> &str {
        "apikey"
    }
}

/// Token-refresh authentication shaped like OAuth 2.0
///
/// Requires both API key and API secret. The access token from the
/// credentials becomes the active token; an empty access token therefore
/// leaves `is_authenticated` false even though `authenticate` succeeded.
#[derive(Debug, Default)]
pub struct OAuth2Auth {
    authenticated: bool,
    active_token: String,
}

impl OAuth2Auth {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthStrategy for OAuth2Auth {
    fn authenticate(&mut self, credentials: &Credentials) -> bool {
        debug!(client = %credentials.account, "Authenticating via OAuth 2.0");

        if credentials.api_key.is_empty() || credentials.api_secret.is_empty() {
            warn!(
                client = %credentials.account,
                "OAuth 2.0 authentication failed: API key and API secret are both required"
            );
            self.authenticated = false;
            self.active_token.clear();
            return false;
        }

        self.active_token = credentials.access_token.clone();
        self.authenticated = true;
        info!(client = %credentials.account, "OAuth 2.0 authentication succeeded");
        true
    }

    fn refresh(&mut self, _refresh_token: &str) -> String {
        let token = format!("oauth2_{}", Uuid::new_v4().simple());
        self.active_token = token.clone();
        info!("OAuth 2.0 token refreshed");
        token
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated && !self.active_token.is_empty()
    }

    fn name(&self) -> &str {
        "oauth2"
    }
}

/// Bearer/session authentication shaped like JWT
///
/// Requires a non-empty access token, which becomes the active token.
#[derive(Debug, Default)]
pub struct JwtAuth {
    authenticated: bool,
    token: String,
}

impl JwtAuth {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthStrategy for JwtAuth {
    fn authenticate(&mut self, credentials: &Credentials) -> bool {
        debug!(account = %credentials.account, "Authenticating via JWT");

        if credentials.access_token.is_empty() {
            warn!(account = %credentials.account, "JWT authentication failed: access token is empty");
            self.authenticated = false;
            self.token.clear();
            return false;
        }

        self.token = credentials.access_token.clone();
        self.authenticated = true;
        info!(account = %credentials.account, "JWT authentication succeeded");
        true
    }

    fn refresh(&mut self, _refresh_token: &str) -> String {
        let token = format!("jwt_{}", Uuid::new_v4().simple());
        self.token = token.clone();
        info!("JWT refreshed");
        token
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated && !self.token.is_empty()
    }

    fn name(&self) -> &str {
        "jwt"
    }
}
