//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid timeout")]
    InvalidTimeout,

    #[error("Invalid URL: {0}")]
    InvalidUrl(&'static str),

    #[error("Redirect URL must be an http(s) URL ending in /auth/callback")]
    InvalidRedirectUrl,

    #[error("OAuth endpoints must use HTTPS in production")]
    OAuthEndpointMustBeHttps,

    #[error("Pending authorization TTL must be positive")]
    InvalidPendingTtl,

    #[error("Pending authorization capacity must be positive")]
    InvalidPendingCapacity,

    #[error("Session buffer must be between 1 and 4096")]
    InvalidSessionBuffer,
}
