//! Application layer - Tool dispatch and the deferred authorization flow.
//!
//! This layer orchestrates domain types and coordinates between ports.
//! Transports call into `ToolDispatcher`; the OAuth callback calls into
//! `AuthorizationFlowManager`.

pub mod authorization_flow;
pub mod calendar_proxy;
mod current_time;
pub mod dispatcher;

pub use authorization_flow::{
    AuthorizationFlowConfig, AuthorizationFlowManager, CompletedAuthorization,
};
pub use calendar_proxy::CalendarProxy;
pub use dispatcher::ToolDispatcher;
