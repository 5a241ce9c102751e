//! SSE stream and message endpoints.
//!
//! Connection lifecycle:
//! 1. `GET /mcp/sse` opens a session and sends an `endpoint` event carrying
//!    the absolute message URL
//! 2. The client posts JSON-RPC to `<base_url>/mcp/message?sessionId=<id>`
//! 3. Responses and notifications arrive as `message` events
//! 4. When the stream is dropped the session and its bindings are removed

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use serde::Deserialize;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};

use crate::adapters::http::dto::ErrorResponse;
use crate::domain::foundation::{ErrorCode, SessionId};

use super::messages::{JsonRpcRequest, JsonRpcResponse, SessionMessage};
use super::protocol::McpProtocol;
use super::sessions::SessionHub;

pub const SSE_PATH: &str = "/mcp/sse";
pub const MESSAGE_PATH: &str = "/mcp/message";

/// State shared by the event-stream endpoints.
#[derive(Clone)]
pub struct EventStreamState {
    pub hub: Arc<SessionHub>,
    pub protocol: Arc<McpProtocol>,
    /// Public base URL prefixed to the announced message endpoint
    pub base_url: String,
    pub keep_alive: Duration,
}

/// Closes the session when the SSE stream is dropped.
struct SessionGuard {
    hub: Arc<SessionHub>,
    id: SessionId,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let hub = Arc::clone(&self.hub);
        let id = self.id;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    hub.close_session(id).await;
                });
            }
            Err(_) => {
                tracing::debug!(session_id = %id, "No runtime to close session");
            }
        }
    }
}

/// Opens an event stream.
///
/// Route: `GET /mcp/sse`
pub async fn sse_handler(
    State(state): State<EventStreamState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (id, rx) = state.hub.open_session().await;
    let guard = SessionGuard {
        hub: Arc::clone(&state.hub),
        id,
    };
    tracing::info!(session_id = %id, "Event stream opened");

    let endpoint = Event::default()
        .event("endpoint")
        .data(endpoint_url(&state.base_url, id));

    let messages = ReceiverStream::new(rx).filter_map(move |message| {
        let _session = &guard;
        to_event(&message).map(Ok::<_, Infallible>)
    });

    let stream = tokio_stream::once(Ok::<_, Infallible>(endpoint)).chain(messages);

    Sse::new(stream).keep_alive(KeepAlive::new().interval(state.keep_alive).text("keep-alive"))
}

/// Absolute URL a session posts its messages to.
fn endpoint_url(base_url: &str, id: SessionId) -> String {
    format!(
        "{}{}?sessionId={}",
        base_url.trim_end_matches('/'),
        MESSAGE_PATH,
        id
    )
}

fn to_event(message: &SessionMessage) -> Option<Event> {
    match serde_json::to_string(message) {
        Ok(data) => Some(Event::default().event("message").data(data)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize session message");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// Accepts one JSON-RPC message for a session.
///
/// Route: `POST /mcp/message?sessionId=<id>`
///
/// The response, if any, is pushed on the session's stream and the POST
/// answers `202 Accepted`.
pub async fn message_handler(
    State(state): State<EventStreamState>,
    Query(query): Query<MessageQuery>,
    body: Bytes,
) -> Response {
    // 1. Resolve the session
    let raw_id = match query.session_id.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => raw,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("sessionId is required")),
            )
                .into_response();
        }
    };
    let known = match raw_id.parse::<SessionId>() {
        Ok(id) => state.hub.has_session(id).await.then_some(id),
        Err(_) => None,
    };
    let session = match known {
        Some(id) => id,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    ErrorCode::SessionNotFound,
                    format!("session not found: {}", raw_id),
                )),
            )
                .into_response();
        }
    };

    // 2. Parse the JSON-RPC message
    let request: JsonRpcRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(session_id = %session, error = %e, "Malformed JSON-RPC message");
            return (StatusCode::BAD_REQUEST, Json(JsonRpcResponse::parse_error(e))).into_response();
        }
    };

    // 3. Handle and push the response on the stream
    if let Some(response) = state.protocol.handle(request, session).await {
        if let Err(e) = state.hub.respond(session, response).await {
            tracing::warn!(session_id = %session, error = %e, "Response dropped");
        }
    }

    StatusCode::ACCEPTED.into_response()
}
