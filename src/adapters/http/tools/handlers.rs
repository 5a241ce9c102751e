//! HTTP handlers for tools endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::dto::ErrorResponse;
use crate::application::ToolDispatcher;
use crate::domain::tools::ToolInvocation;

use super::dto::{InvokeToolRequest, InvokeToolResponse, ListToolsQuery, ListToolsResponse};

/// Application state for tools endpoints.
#[derive(Clone)]
pub struct ToolsAppState {
    /// Dispatcher shared with the event-stream transport
    pub dispatcher: Arc<ToolDispatcher>,
}

/// List the registered tools.
///
/// GET /api/tools?format=openai
pub async fn list_tools(
    State(state): State<ToolsAppState>,
    Query(query): Query<ListToolsQuery>,
) -> Response {
    let registry = state.dispatcher.registry();

    let tools = match query.format.as_str() {
        "mcp" => registry.to_mcp_tools(),
        "openai" => registry.to_openai_tools(),
        "anthropic" => registry.to_anthropic_tools(),
        other => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(format!(
                    "unsupported format `{}`; expected mcp, openai or anthropic",
                    other
                ))),
            )
                .into_response();
        }
    };

    Json(ListToolsResponse {
        format: query.format,
        count: tools.len(),
        tools: serde_json::Value::Array(tools),
    })
    .into_response()
}

/// Invoke a tool outside of any event-stream session.
///
/// POST /api/tools/invoke
///
/// Tool failures are reported in the body with `200 OK`; the status code
/// only reflects whether the request itself was well formed.
pub async fn invoke_tool(
    State(state): State<ToolsAppState>,
    Json(request): Json<InvokeToolRequest>,
) -> impl IntoResponse {
    let invocation = ToolInvocation::new(&request.tool_name, request.arguments);
    let invocation_id = invocation.id().to_string();

    let start = Instant::now();
    let result = state.dispatcher.dispatch(invocation).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    (
        StatusCode::OK,
        Json(InvokeToolResponse::from_result(
            invocation_id,
            request.tool_name,
            &result,
            duration_ms,
        )),
    )
}
