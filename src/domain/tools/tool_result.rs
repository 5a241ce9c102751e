//! Tool execution result value object.
//!
//! Every dispatch produces a [`ToolResult`]; failures are data, not `Err`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::foundation::ErrorCode;

use super::ArgumentError;

/// Category of a tool outcome.
///
/// # Examples
///
/// ```
/// use calendar_mcp::domain::tools::ToolResultKind;
///
/// assert!(!ToolResultKind::Success.is_error());
/// assert!(ToolResultKind::AuthenticationRequired.is_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolResultKind {
    /// Tool executed successfully
    Success,

    /// No tool is registered under the requested name
    UnknownTool,

    /// Arguments failed validation against the tool's parameters
    ValidationError,

    /// The tool needs a credential that has not been granted yet
    AuthenticationRequired,

    /// The remote calendar service reported a failure
    ServiceError,
}

impl ToolResultKind {
    /// True for every kind except `Success`.
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Success)
    }

    /// Error code reported alongside failed results.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Success => None,
            Self::UnknownTool => Some(ErrorCode::ToolNotFound),
            Self::ValidationError => Some(ErrorCode::ValidationFailed),
            Self::AuthenticationRequired => Some(ErrorCode::AuthenticationRequired),
            Self::ServiceError => Some(ErrorCode::RemoteServiceError),
        }
    }

    /// Returns a human-readable description of the kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Success => "Tool executed successfully",
            Self::UnknownTool => "No such tool",
            Self::ValidationError => "Tool arguments failed validation",
            Self::AuthenticationRequired => "Authentication required",
            Self::ServiceError => "Remote calendar service error",
        }
    }
}

impl std::fmt::Display for ToolResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Outcome of a dispatched tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    kind: ToolResultKind,
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    retry_tool: Option<String>,
}

impl ToolResult {
    /// Creates a successful result with text content.
    pub fn success(content: impl Into<String>) -> Self {
        Self::with_kind(ToolResultKind::Success, content)
    }

    /// Creates the result for a name that is not registered.
    pub fn unknown_tool(name: &str) -> Self {
        Self::with_kind(ToolResultKind::UnknownTool, format!("unknown tool: {}", name))
    }

    /// Creates the result for arguments that failed validation.
    pub fn validation_error(error: &ArgumentError) -> Self {
        Self::with_kind(
            ToolResultKind::ValidationError,
            format!("invalid arguments: {}", error),
        )
    }

    /// Creates the result telling the caller to authenticate and retry.
    ///
    /// The content names the `auth` tool and the `for_method` value to pass;
    /// `retry_tool` carries the tool to call again afterwards.
    pub fn authentication_required(tool_name: &str) -> Self {
        Self {
            kind: ToolResultKind::AuthenticationRequired,
            content: format!(
                "AUTHENTICATION_REQUIRED: `{tool}` needs access to Google Calendar. \
                 Call the `auth` tool with for_method=\"{tool}\", open the returned URL, \
                 then retry `{tool}` once the authorization notification arrives.",
                tool = tool_name
            ),
            retry_tool: Some(tool_name.to_string()),
        }
    }

    /// Creates the result for a remote service failure rendered as text.
    pub fn service_error(content: impl Into<String>) -> Self {
        Self::with_kind(ToolResultKind::ServiceError, content)
    }

    fn with_kind(kind: ToolResultKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            retry_tool: None,
        }
    }

    pub fn kind(&self) -> ToolResultKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn retry_tool(&self) -> Option<&str> {
        self.retry_tool.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }

    /// Renders as an MCP `CallToolResult`.
    pub fn to_mcp_content(&self) -> Value {
        json!({
            "content": [{ "type": "text", "text": self.content }],
            "isError": self.is_error()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_not_error() {
        let result = ToolResult::success("ok");
        assert!(!result.is_error());
        assert_eq!(result.kind().error_code(), None);
    }

    #[test]
    fn unknown_tool_names_the_tool() {
        let result = ToolResult::unknown_tool("frobnicate");
        assert!(result.is_error());
        assert_eq!(result.content(), "unknown tool: frobnicate");
    }

    #[test]
    fn validation_error_names_parameter() {
        let result = ToolResult::validation_error(&ArgumentError::missing("summary"));
        assert_eq!(result.kind(), ToolResultKind::ValidationError);
        assert!(result.content().contains("`summary`"));
    }

    #[test]
    fn authentication_required_points_at_auth_tool() {
        let result = ToolResult::authentication_required("list_events");

        assert_eq!(result.kind(), ToolResultKind::AuthenticationRequired);
        assert_eq!(result.retry_tool(), Some("list_events"));
        assert!(result.content().starts_with("AUTHENTICATION_REQUIRED"));
        assert!(result.content().contains("for_method=\"list_events\""));
    }

    #[test]
    fn mcp_content_marks_errors() {
        let json = ToolResult::service_error("Error listing calendars: boom").to_mcp_content();

        assert_eq!(json["isError"], true);
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "Error listing calendars: boom");
    }

    #[test]
    fn kind_serializes_to_snake_case() {
        let json = serde_json::to_string(&ToolResultKind::AuthenticationRequired).unwrap();
        assert_eq!(json, "\"authentication_required\"");
    }

    #[test]
    fn error_codes_display_upper_snake() {
        assert_eq!(
            ToolResultKind::UnknownTool.error_code().unwrap().to_string(),
            "TOOL_NOT_FOUND"
        );
    }
}
