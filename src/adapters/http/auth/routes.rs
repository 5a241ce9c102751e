//! Axum router configuration for auth endpoints.

use axum::{routing::get, Router};

use super::handlers::{oauth_callback, AuthAppState};

/// Create the auth router.
///
/// # Routes
///
/// - `GET /auth/callback` - OAuth2 redirect target (query: code, state)
pub fn auth_router() -> Router<AuthAppState> {
    Router::new().route("/auth/callback", get(oauth_callback))
}
