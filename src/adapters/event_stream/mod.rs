//! Event-stream transport - MCP over server-sent events.
//!
//! Provides:
//! - `SessionHub`: per-connection queues and correlation token bindings,
//!   implementing the `NotificationChannel` port
//! - `McpProtocol`: JSON-RPC method handling
//! - SSE and message endpoints for axum

mod handler;
pub mod messages;
mod protocol;
mod sessions;

pub use handler::{
    message_handler, sse_handler, EventStreamState, MessageQuery, MESSAGE_PATH, SSE_PATH,
};
pub use messages::{
    JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, SessionMessage,
};
pub use protocol::{McpProtocol, PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};
pub use sessions::{SessionHub, TransportError};
