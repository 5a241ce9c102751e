//! Tool schema registry.
//!
//! Domain types describing the operations an agent can invoke over the
//! event stream and the outcome of invoking them.
//!
//! ## Key Types
//!
//! - [`ToolDefinition`] - Name, description, parameters and auth requirement
//! - [`ParameterSpec`] - One typed parameter with optional default
//! - [`ToolRegistry`] - Ordered, name-indexed set of definitions
//! - [`ToolInvocation`] - Inbound request to run a tool
//! - [`ToolArguments`] - Arguments after validation and defaulting
//! - [`ToolResult`] - Outcome of a dispatch, errors included

pub mod catalog;
mod parameter;
mod tool_arguments;
mod tool_definition;
mod tool_invocation;
mod tool_registry;
mod tool_result;

pub use catalog::calendar_registry;
pub use parameter::{ParameterKind, ParameterSpec};
pub use tool_arguments::{ArgumentError, ToolArguments};
pub use tool_definition::ToolDefinition;
pub use tool_invocation::ToolInvocation;
pub use tool_registry::{ToolRegistry, ToolRegistryError};
pub use tool_result::{ToolResult, ToolResultKind};
