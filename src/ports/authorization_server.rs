//! Authorization Server Port - OAuth2 authorization-code provider.
//!
//! # Contract
//!
//! Implementations must:
//! - Build a consent URL that carries the correlation token as `state`
//!   and asks for offline access
//! - Exchange a one-time code for a credential
//! - Refresh a credential that carries a refresh token

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::authorization::{CorrelationToken, Credential};

/// OAuth2 provider operations used by the authorization flow.
#[async_trait]
pub trait AuthorizationServer: Send + Sync {
    /// Consent URL for the given correlation token. Never fails.
    fn authorization_url(&self, state: &CorrelationToken) -> String;

    /// Exchanges an authorization code for a credential.
    async fn exchange_code(&self, code: &str) -> Result<Credential, AuthorizationError>;

    /// Obtains a fresh access token using the credential's refresh token.
    async fn refresh(&self, credential: &Credential) -> Result<Credential, AuthorizationError>;
}

/// Failures talking to the OAuth2 provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    /// Provider rejected the code or refresh token (`invalid_grant` and friends)
    #[error("grant rejected by provider: {0}")]
    InvalidGrant(String),

    /// Token endpoint answered with an unexpected status
    #[error("token endpoint returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// Connection failure or timeout
    #[error("token endpoint unreachable: {0}")]
    Transport(String),

    /// Token response could not be parsed
    #[error("malformed token response: {0}")]
    Decode(String),

    /// Refresh requested for a credential without a refresh token
    #[error("credential has no refresh token")]
    NoRefreshToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_human_readable() {
        assert_eq!(
            AuthorizationError::InvalidGrant("Bad Request".into()).to_string(),
            "grant rejected by provider: Bad Request"
        );
        assert_eq!(
            AuthorizationError::NoRefreshToken.to_string(),
            "credential has no refresh token"
        );
    }
}
