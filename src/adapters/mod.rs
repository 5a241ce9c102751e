//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `google` - Calendar API and OAuth2 token endpoint clients
//! - `event_stream` - SSE sessions and the MCP JSON-RPC protocol
//! - `http` - Callback and REST endpoints, router assembly

pub mod event_stream;
pub mod google;
pub mod http;
