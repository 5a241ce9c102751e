//! Google adapters - OAuth2 and Calendar v3 over `reqwest`.
//!
//! `mock` holds in-memory implementations of both ports for tests.

mod calendar_client;
pub mod mock;
mod oauth_client;
mod wire;

pub use calendar_client::GoogleCalendarClient;
pub use mock::{MockAuthorizationServer, MockCalendarService};
pub use oauth_client::GoogleOAuthClient;

use reqwest::Url;
use thiserror::Error;

/// Failures constructing a Google client.
#[derive(Debug, Error)]
pub enum GoogleClientError {
    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

fn parse_url(raw: &str) -> Result<Url, GoogleClientError> {
    Url::parse(raw).map_err(|e| GoogleClientError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

const SNIPPET_LEN: usize = 200;

/// First few hundred characters of a response body, for error messages.
fn body_snippet(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(SNIPPET_LEN) {
        Some((end, _)) => format!("{}...", &trimmed[..end]),
        None => trimmed.to_string(),
    }
}
