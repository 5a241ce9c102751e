//! OAuth2 redirect callback handler.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::adapters::http::dto::ErrorResponse;
use crate::application::AuthorizationFlowManager;
use crate::domain::authorization::CorrelationToken;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Application state for the auth endpoints.
#[derive(Clone)]
pub struct AuthAppState {
    pub authorization: Arc<AuthorizationFlowManager>,
}

/// Query string sent by the provider on redirect.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set instead of `code` when the user declined consent
    pub error: Option<String>,
    pub error_description: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Completes an authorization.
///
/// GET /auth/callback?code=..&state=..
///
/// Answers 200 with an empty body on success, 400 when `state` or `code`
/// is missing or consent was declined, 500 when the exchange fails.
pub async fn oauth_callback(
    State(state): State<AuthAppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    // 1. Provider reported a refusal
    if let Some(error) = non_empty(&query.error) {
        tracing::warn!(
            correlation_token = ?query.state,
            error = %error,
            "Authorization declined by provider"
        );
        let message = match non_empty(&query.error_description) {
            Some(description) => format!("{}: {}", error, description),
            None => error.to_string(),
        };
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(ErrorCode::AuthorizationDenied, message)),
        )
            .into_response();
    }

    // 2. Correlation token and code are both required
    let token = match non_empty(&query.state).map(CorrelationToken::new) {
        Some(Ok(token)) => token,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("missing state parameter")),
            )
                .into_response();
        }
    };
    let code = match non_empty(&query.code) {
        Some(code) => code,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("missing code parameter")),
            )
                .into_response();
        }
    };

    // 3. Exchange, install and notify
    match state.authorization.complete_authorization(code, &token).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(err) => {
            let error = DomainError::new(
                ErrorCode::TokenExchangeFailed,
                format!("failed to exchange authorization code: {}", err),
            )
            .with_detail("correlation_token", token.as_str());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::from(error)),
            )
                .into_response()
        }
    }
}
