//! JSON-RPC 2.0 message types carried over the event stream.
//!
//! - Client → Server: `JsonRpcRequest` posted to the message endpoint
//! - Server → Client: `JsonRpcResponse` and `JsonRpcNotification` pushed as
//!   SSE `message` events

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ports::Notification;

pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

/// Method used for log-style server notifications.
pub const LOG_MESSAGE_METHOD: &str = "notifications/message";

// ============================================
// Client → Server
// ============================================

/// Request or notification from the client. Notifications have no `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id.into()),
            method: method.into(),
            params,
        }
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

// ============================================
// Server → Client
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Response to a request, carrying either `result` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Parse error response; the id is unknown so it is `null`.
    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self::error(Value::Null, PARSE_ERROR, format!("parse error: {}", detail))
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Server-initiated notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

impl From<&Notification> for JsonRpcNotification {
    fn from(notification: &Notification) -> Self {
        let logger = match notification {
            Notification::AuthorizationComplete { .. } => "auth",
        };
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: LOG_MESSAGE_METHOD.to_string(),
            params: json!({
                "level": "info",
                "logger": logger,
                "data": serde_json::to_value(notification).unwrap_or(Value::Null),
            }),
        }
    }
}

/// Anything queued on a session's stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SessionMessage {
    Response(JsonRpcResponse),
    Notification(JsonRpcNotification),
}
