//! Google OAuth2 client configuration

use serde::Deserialize;
use std::time::Duration;

use secrecy::{ExposeSecret, Secret};

use super::error::ValidationError;
use super::server::Environment;

/// OAuth2 authorization-code client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthConfig {
    /// OAuth2 client ID
    pub client_id: String,

    /// OAuth2 client secret
    pub client_secret: Secret<String>,

    /// Redirect URL registered with the provider, served by `/auth/callback`
    pub redirect_url: String,

    /// Provider authorization endpoint
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    /// Provider token endpoint
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Requested scopes (comma-separated)
    #[serde(default = "default_scopes")]
    pub scopes: String,

    /// How long an unanswered authorization request is kept, in seconds
    #[serde(default = "default_pending_ttl")]
    pub pending_ttl_secs: u64,

    /// Upper bound on concurrently pending authorization requests
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,

    /// Timeout for token endpoint calls, in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

impl OAuthConfig {
    /// Scopes as a vector.
    pub fn scopes_list(&self) -> Vec<String> {
        self.scopes
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn pending_ttl(&self) -> Duration {
        Duration::from_secs(self.pending_ttl_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Validate OAuth configuration
    ///
    /// In production, requires HTTPS for the provider endpoints.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.client_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("OAUTH__CLIENT_ID"));
        }
        if self.client_secret.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("OAUTH__CLIENT_SECRET"));
        }
        if self.redirect_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("OAUTH__REDIRECT_URL"));
        }
        if !is_http_url(&self.redirect_url) || !self.redirect_url.ends_with("/auth/callback") {
            return Err(ValidationError::InvalidRedirectUrl);
        }
        if !is_http_url(&self.auth_url) || !is_http_url(&self.token_url) {
            return Err(ValidationError::InvalidUrl("OAUTH__AUTH_URL / OAUTH__TOKEN_URL"));
        }
        if *environment == Environment::Production
            && !(self.auth_url.starts_with("https://") && self.token_url.starts_with("https://"))
        {
            return Err(ValidationError::OAuthEndpointMustBeHttps);
        }
        if self.scopes_list().is_empty() {
            return Err(ValidationError::MissingRequired("OAUTH__SCOPES"));
        }
        if self.pending_ttl_secs == 0 {
            return Err(ValidationError::InvalidPendingTtl);
        }
        if self.max_pending == 0 {
            return Err(ValidationError::InvalidPendingCapacity);
        }
        if self.http_timeout_secs == 0 || self.http_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: Secret::new(String::new()),
            redirect_url: String::new(),
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            scopes: default_scopes(),
            pending_ttl_secs: default_pending_ttl(),
            max_pending: default_max_pending(),
            http_timeout_secs: default_http_timeout(),
        }
    }
}

pub(super) fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn default_auth_url() -> String {
    "https://accounts.google.com/o/oauth2/auth".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_scopes() -> String {
    "https://www.googleapis.com/auth/calendar".to_string()
}

fn default_pending_ttl() -> u64 {
    900
}

fn default_max_pending() -> usize {
    256
}

fn default_http_timeout() -> u64 {
    10
}
