//! OAuth2 credential value object.

use secrecy::{ExposeSecret, Secret};

use crate::domain::foundation::Timestamp;

/// Access token (plus optional refresh token) granted by the provider.
///
/// Token material is wrapped in [`Secret`] so it never shows up in
/// `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct Credential {
    access_token: Secret<String>,
    refresh_token: Option<Secret<String>>,
    expiry: Option<Timestamp>,
    token_type: String,
}

impl Credential {
    /// Creates a bearer credential with no refresh token and no expiry.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Secret::new(access_token.into()),
            refresh_token: None,
            expiry: None,
            token_type: "Bearer".to_string(),
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(Secret::new(refresh_token.into()));
        self
    }

    pub fn expiring_at(mut self, expiry: Timestamp) -> Self {
        self.expiry = Some(expiry);
        self
    }

    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    /// Keeps the previous refresh token when a refresh response omitted one.
    pub fn inheriting_refresh_token(mut self, previous: &Credential) -> Self {
        if self.refresh_token.is_none() {
            self.refresh_token = previous.refresh_token.clone();
        }
        self
    }

    /// Exposes the access token for building an `Authorization` header.
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_ref().map(|t| t.expose_secret().as_str())
    }

    pub fn expiry(&self) -> Option<Timestamp> {
        self.expiry
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// True when the token expires within `skew_secs` of `now`.
    ///
    /// Credentials without an expiry never expire.
    pub fn is_expired_at(&self, now: Timestamp, skew_secs: i64) -> bool {
        match self.expiry {
            Some(expiry) => !expiry.is_after(&now.plus_secs(skew_secs)),
            None => false,
        }
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }
}
