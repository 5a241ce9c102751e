//! Axum router configuration for tools endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{invoke_tool, list_tools, ToolsAppState};

/// Create the tools API router.
///
/// Suitable for mounting at `/api/tools`.
///
/// # Routes
///
/// - `GET /` - List registered tools (query: format)
/// - `POST /invoke` - Invoke a tool without a session
pub fn tools_router() -> Router<ToolsAppState> {
    Router::new()
        .route("/", get(list_tools))
        .route("/invoke", post(invoke_tool))
}
