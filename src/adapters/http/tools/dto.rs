//! Data transfer objects for tools HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::tools::{ToolResult, ToolResultKind};

// ═══════════════════════════════════════════════════════════════════════════
// Request DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Request to invoke a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeToolRequest {
    /// Name of the tool to invoke
    pub tool_name: String,
    /// Tool arguments as a JSON object
    #[serde(default = "empty_arguments")]
    pub arguments: serde_json::Value,
}

fn empty_arguments() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Query parameters for listing tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsQuery {
    /// Output format: "mcp", "openai" or "anthropic"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "mcp".to_string()
}

// ═══════════════════════════════════════════════════════════════════════════
// Response DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Response with available tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResponse {
    /// Format used
    pub format: String,
    /// Number of tools
    pub count: usize,
    /// Tool definitions (shape depends on `format`)
    pub tools: serde_json::Value,
}

/// Response from invoking a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeToolResponse {
    /// Invocation ID for tracking
    pub invocation_id: String,
    /// Tool that was invoked
    pub tool_name: String,
    /// Outcome category
    pub kind: ToolResultKind,
    pub is_error: bool,
    /// Machine-readable code for failed results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Text returned to the agent
    pub content: String,
    /// Tool to call again once authorization completes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_tool: Option<String>,
    /// Execution duration in milliseconds
    pub duration_ms: u64,
}

impl InvokeToolResponse {
    pub fn from_result(
        invocation_id: String,
        tool_name: String,
        result: &ToolResult,
        duration_ms: u64,
    ) -> Self {
        Self {
            invocation_id,
            tool_name,
            kind: result.kind(),
            is_error: result.is_error(),
            error_code: result.kind().error_code().map(|code| code.to_string()),
            content: result.content().to_string(),
            retry_tool: result.retry_tool().map(String::from),
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoke_request_defaults_arguments_to_empty_object() {
        let request: InvokeToolRequest =
            serde_json::from_str(r#"{"tool_name": "list_calendars"}"#).unwrap();
        assert_eq!(request.arguments, serde_json::json!({}));
    }

    #[test]
    fn list_query_defaults_to_mcp() {
        let query: ListToolsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.format, "mcp");
    }

    #[test]
    fn invoke_response_carries_retry_tool_for_auth_required() {
        let result = ToolResult::authentication_required("list_events");
        let response =
            InvokeToolResponse::from_result("inv".to_string(), "list_events".to_string(), &result, 3);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["kind"], "authentication_required");
        assert_eq!(json["is_error"], true);
        assert_eq!(json["retry_tool"], "list_events");
        assert_eq!(json["error_code"], "AUTHENTICATION_REQUIRED");
    }

    #[test]
    fn invoke_response_omits_retry_tool_on_success() {
        let result = ToolResult::success("ok");
        let response =
            InvokeToolResponse::from_result("inv".to_string(), "auth".to_string(), &result, 0);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("retry_tool").is_none());
        assert_eq!(json["kind"], "success");
    }
}
