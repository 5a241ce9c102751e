//! Tool Registry - Central registry of every invocable tool.
//!
//! The registry is filled once at startup and then shared read-only as an
//! `Arc<ToolRegistry>`. Lookup is by name; listing preserves registration
//! order so `tools/list` is stable.
//!
//! # Example
//!
//! ```
//! use calendar_mcp::domain::tools::{ToolDefinition, ToolRegistry};
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register(ToolDefinition::new("list_calendars", "List all accessible Google Calendars"))
//!     .unwrap();
//!
//! assert!(registry.resolve("list_calendars").is_ok());
//! assert!(registry.resolve("nope").is_err());
//! ```

use std::collections::HashMap;

use thiserror::Error;

use super::ToolDefinition;

/// Registry lookup and registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolRegistryError {
    #[error("tool `{0}` is already registered")]
    DuplicateName(String),

    #[error("unknown tool: {0}")]
    NotFound(String),
}

/// Central registry for all tools.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    /// Definitions in registration order
    tools: Vec<ToolDefinition>,

    /// Name to position in `tools`
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Creates a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool. Names must be unique.
    pub fn register(&mut self, definition: ToolDefinition) -> Result<(), ToolRegistryError> {
        if self.index.contains_key(definition.name()) {
            return Err(ToolRegistryError::DuplicateName(
                definition.name().to_string(),
            ));
        }
        self.index
            .insert(definition.name().to_string(), self.tools.len());
        self.tools.push(definition);
        Ok(())
    }

    /// Gets a tool definition by name.
    pub fn resolve(&self, name: &str) -> Result<&ToolDefinition, ToolRegistryError> {
        self.index
            .get(name)
            .and_then(|&i| self.tools.get(i))
            .ok_or_else(|| ToolRegistryError::NotFound(name.to_string()))
    }

    /// Checks if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All definitions in registration order.
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Returns the number of registered tools.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Converts all tools to MCP `tools/list` entries.
    pub fn to_mcp_tools(&self) -> Vec<serde_json::Value> {
        self.tools.iter().map(ToolDefinition::to_mcp_format).collect()
    }

    /// Converts all tools to OpenAI function format.
    pub fn to_openai_tools(&self) -> Vec<serde_json::Value> {
        self.tools
            .iter()
            .map(ToolDefinition::to_openai_format)
            .collect()
    }

    /// Converts all tools to Anthropic tool format.
    pub fn to_anthropic_tools(&self) -> Vec<serde_json::Value> {
        self.tools
            .iter()
            .map(ToolDefinition::to_anthropic_format)
            .collect()
    }
}
