//! MCP method handling over JSON-RPC.
//!
//! Supports `initialize`, `notifications/initialized`, `ping`,
//! `tools/list` and `tools/call`. Tool calls go through the dispatcher
//! with the calling session attached, so an `auth` call binds that session
//! to the correlation token.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::application::ToolDispatcher;
use crate::domain::foundation::SessionId;
use crate::domain::tools::ToolInvocation;

use super::messages::{
    JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION,
    METHOD_NOT_FOUND,
};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "Google Calendar MCP";
pub const SERVER_VERSION: &str = "0.1.0";

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// Answers MCP requests for one server instance.
pub struct McpProtocol {
    dispatcher: Arc<ToolDispatcher>,
}

impl McpProtocol {
    pub fn new(dispatcher: Arc<ToolDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Handles one message from `session`.
    ///
    /// Returns `None` for notifications, which never get a response.
    pub async fn handle(&self, request: JsonRpcRequest, session: SessionId) -> Option<JsonRpcResponse> {
        let id = match request.id.clone() {
            Some(id) => id,
            None => {
                self.handle_notification(&request, session);
                return None;
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                "jsonrpc must be \"2.0\"",
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                json!({ "tools": self.dispatcher.registry().to_mcp_tools() }),
            ),
            "tools/call" => self.call_tool(id, request.params, session).await,
            other => {
                tracing::debug!(session_id = %session, method = %other, "Unknown method");
                JsonRpcResponse::error(id, METHOD_NOT_FOUND, format!("method not found: {}", other))
            }
        };
        Some(response)
    }

    fn handle_notification(&self, request: &JsonRpcRequest, session: SessionId) {
        match request.method.as_str() {
            "notifications/initialized" => {
                tracing::info!(session_id = %session, "Client initialized");
            }
            other => {
                tracing::debug!(session_id = %session, method = %other, "Notification ignored");
            }
        }
    }

    async fn call_tool(&self, id: Value, params: Option<Value>, session: SessionId) -> JsonRpcResponse {
        let params = match params.map(serde_json::from_value::<CallToolParams>) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, format!("invalid params: {}", e))
            }
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "missing params"),
        };

        let invocation = ToolInvocation::new(
            params.name,
            params.arguments.unwrap_or_else(|| json!({})),
        )
        .with_session(session);

        let result = self.dispatcher.dispatch(invocation).await;
        JsonRpcResponse::success(id, result.to_mcp_content())
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false },
            "logging": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::event_stream::SessionHub;
    use crate::adapters::google::{MockAuthorizationServer, MockCalendarService};
    use crate::application::{
        AuthorizationFlowConfig, AuthorizationFlowManager, CalendarProxy,
    };
    use crate::domain::authorization::CredentialStore;
    use crate::domain::tools::calendar_registry;
    use std::time::Duration;

    fn protocol() -> McpProtocol {
        let hub = Arc::new(SessionHub::with_settings(8, Duration::from_millis(50)));
        let (writer, reader) = CredentialStore::new().split();
        let authorization = Arc::new(AuthorizationFlowManager::new(
            Arc::new(MockAuthorizationServer::new()),
            hub,
            writer,
            AuthorizationFlowConfig::default(),
        ));
        let dispatcher = ToolDispatcher::new(
            Arc::new(calendar_registry().unwrap()),
            authorization,
            CalendarProxy::new(Arc::new(MockCalendarService::new()), reader),
        );
        McpProtocol::new(Arc::new(dispatcher))
    }

    fn request(method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest::new(7, method, params)
    }

    #[tokio::test]
    async fn initialize_reports_server_info() {
        let response = protocol()
            .handle(request("initialize", Some(json!({}))), SessionId::new())
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "Google Calendar MCP");
        assert_eq!(result["serverInfo"]["version"], "0.1.0");
        assert!(result["capabilities"]["tools"].is_object());
        assert_eq!(response.id, json!(7));
    }

    #[tokio::test]
    async fn tools_list_returns_all_tools() {
        let response = protocol()
            .handle(request("tools/list", None), SessionId::new())
            .await
            .unwrap();

        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
        assert_eq!(tools.len(), 7);
        assert_eq!(tools[0]["name"], "auth");
        assert!(tools[0]["inputSchema"]["required"]
            .as_array()
            .unwrap()
            .contains(&json!("for_method")));
    }

    #[tokio::test]
    async fn tools_call_wraps_tool_result() {
        let response = protocol()
            .handle(
                request(
                    "tools/call",
                    Some(json!({"name": "list_calendars", "arguments": {}})),
                ),
                SessionId::new(),
            )
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("AUTHENTICATION_REQUIRED"));
    }

    #[tokio::test]
    async fn tools_call_without_params_is_invalid() {
        let response = protocol()
            .handle(request("tools/call", None), SessionId::new())
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn unknown_method_is_reported() {
        let response = protocol()
            .handle(request("resources/list", None), SessionId::new())
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let notification: JsonRpcRequest =
            serde_json::from_value(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
                .unwrap();

        assert!(protocol().handle(notification, SessionId::new()).await.is_none());
    }

    #[tokio::test]
    async fn wrong_version_is_invalid_request() {
        let mut bad = request("ping", None);
        bad.jsonrpc = "1.0".into();

        let response = protocol().handle(bad, SessionId::new()).await.unwrap();

        assert_eq!(response.error.unwrap().code, INVALID_REQUEST);
    }
}
