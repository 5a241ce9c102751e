//! Tools HTTP adapter - REST API for the tool registry.
//!
//! Provides endpoints for:
//! - Listing registered tools in MCP, OpenAI or Anthropic format
//! - Invoking a tool without an event-stream session

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;

pub use handlers::ToolsAppState;
pub use routes::tools_router;
