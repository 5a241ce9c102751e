//! Top-level application router.
//!
//! The SSE stream is long-lived and is mounted outside the request timeout;
//! every other route is bounded by `server.request_timeout_secs`.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapters::event_stream::{
    message_handler, sse_handler, EventStreamState, McpProtocol, SessionHub, MESSAGE_PATH,
    SSE_PATH,
};
use crate::application::{AuthorizationFlowManager, ToolDispatcher};
use crate::config::ServerConfig;

use super::auth::{auth_router, AuthAppState};
use super::tools::{tools_router, ToolsAppState};

/// Shared services the routes are built from.
#[derive(Clone)]
pub struct AppState {
    pub hub: Arc<SessionHub>,
    pub protocol: Arc<McpProtocol>,
    pub dispatcher: Arc<ToolDispatcher>,
    pub authorization: Arc<AuthorizationFlowManager>,
    pub keep_alive: Duration,
}

/// Builds the complete router.
///
/// # Routes
///
/// - `GET /mcp/sse` - Event stream (no timeout)
/// - `POST /mcp/message?sessionId=` - JSON-RPC messages for a session
/// - `GET /auth/callback` - OAuth2 redirect target
/// - `GET /api/tools`, `POST /api/tools/invoke` - REST access to the registry
/// - `GET /health` - Liveness check
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    let stream_state = EventStreamState {
        hub: state.hub,
        protocol: state.protocol,
        base_url: server.public_base_url(),
        keep_alive: state.keep_alive,
    };

    let stream = Router::new()
        .route(SSE_PATH, get(sse_handler))
        .with_state(stream_state.clone());

    let bounded = Router::new()
        .route(MESSAGE_PATH, post(message_handler))
        .with_state(stream_state)
        .merge(auth_router().with_state(AuthAppState {
            authorization: state.authorization,
        }))
        .nest(
            "/api/tools",
            tools_router().with_state(ToolsAppState {
                dispatcher: state.dispatcher,
            }),
        )
        .route("/health", get(health))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_secs,
        )));

    stream
        .merge(bounded)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origins_list()))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request},
    };
    use tower::ServiceExt;

    async fn allowed_origin(origins: &[String], origin: &str) -> Option<String> {
        let app = Router::new()
            .route("/health", get(health))
            .layer(cors_layer(origins));
        let request = Request::builder()
            .uri("/health")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn cors_layer_allows_only_configured_origins() {
        let origins = vec!["http://localhost:3000".to_string(), "bad\norigin".to_string()];

        assert_eq!(
            allowed_origin(&origins, "http://localhost:3000").await.as_deref(),
            Some("http://localhost:3000")
        );
        assert_eq!(allowed_origin(&origins, "http://evil.example").await, None);
    }

    #[tokio::test]
    async fn cors_layer_defaults_to_any() {
        assert_eq!(
            allowed_origin(&[], "http://anywhere.example").await.as_deref(),
            Some("*")
        );
    }
}
