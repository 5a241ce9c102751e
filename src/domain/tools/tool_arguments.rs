//! Validated tool arguments.
//!
//! A [`ToolArguments`] only exists after [`ToolDefinition::validate`]
//! accepted the raw JSON, so every declared parameter is either present
//! with the right JSON type, filled from its default, or genuinely absent.
//!
//! [`ToolDefinition::validate`]: super::ToolDefinition::validate

use serde_json::{Map, Value};
use thiserror::Error;

use super::ParameterKind;

/// Reasons raw arguments are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("arguments must be a JSON object")]
    NotAnObject,

    #[error("missing required parameter `{name}`")]
    Missing { name: String },

    #[error("parameter `{name}` must be a {expected}")]
    WrongType { name: String, expected: ParameterKind },

    #[error("parameter `{name}` is invalid: {reason}")]
    Invalid { name: String, reason: String },
}

impl ArgumentError {
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }

    pub fn wrong_type(name: impl Into<String>, expected: ParameterKind) -> Self {
        Self::WrongType {
            name: name.into(),
            expected,
        }
    }

    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Argument map that passed schema validation with defaults applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: Map<String, Value>,
}

impl ToolArguments {
    pub(super) fn from_validated(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Returns a string argument, failing if it is absent.
    pub fn string(&self, name: &str) -> Result<&str, ArgumentError> {
        self.optional_string(name)
            .ok_or_else(|| ArgumentError::missing(name))
    }

    /// Returns a string argument if present.
    pub fn optional_string(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    /// Returns a numeric argument, failing if it is absent.
    pub fn number(&self, name: &str) -> Result<f64, ArgumentError> {
        self.values
            .get(name)
            .and_then(Value::as_f64)
            .ok_or_else(|| ArgumentError::missing(name))
    }

    /// Returns a numeric argument truncated to an integer, if present.
    pub fn optional_integer(&self, name: &str) -> Option<i64> {
        self.values
            .get(name)
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}
