//! HTTP adapters - REST endpoints and router assembly.
//!
//! - `auth` - OAuth2 redirect callback
//! - `tools` - Tool listing and sessionless invocation
//! - `router` - Combines these with the event-stream endpoints

pub mod auth;
pub mod dto;
pub mod router;
pub mod tools;

pub use auth::{auth_router, AuthAppState};
pub use dto::ErrorResponse;
pub use router::{app_router, AppState};
pub use tools::{tools_router, ToolsAppState};
