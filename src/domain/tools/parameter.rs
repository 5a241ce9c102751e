//! Parameter specification for a tool's input schema.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// JSON type a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    String,
    Number,
}

impl ParameterKind {
    /// JSON Schema `type` keyword for this kind.
    pub fn json_type(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
        }
    }
}

impl std::fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.json_type())
    }
}

/// One named, typed parameter of a tool.
///
/// Built with [`ParameterSpec::string`] or [`ParameterSpec::number`] and
/// refined with [`required`](ParameterSpec::required) or
/// [`with_default`](ParameterSpec::with_default).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    name: String,
    kind: ParameterKind,
    description: String,
    required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
}

impl ParameterSpec {
    /// Creates an optional string parameter.
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::String, description)
    }

    /// Creates an optional number parameter.
    pub fn number(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParameterKind::Number, description)
    }

    fn new(name: impl Into<String>, kind: ParameterKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: false,
            default: None,
        }
    }

    /// Marks the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the value used when the caller omits the parameter.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// JSON Schema fragment describing this parameter.
    pub fn json_schema(&self) -> Value {
        let mut schema = json!({
            "type": self.kind.json_type(),
            "description": self.description,
        });
        if let Some(default) = &self.default {
            schema["default"] = default.clone();
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_parameter_is_optional_by_default() {
        let spec = ParameterSpec::string("summary", "Event title/summary");
        assert_eq!(spec.kind(), ParameterKind::String);
        assert!(!spec.is_required());
        assert!(spec.default_value().is_none());
    }

    #[test]
    fn required_marks_parameter() {
        let spec = ParameterSpec::string("event_id", "The event ID").required();
        assert!(spec.is_required());
    }

    #[test]
    fn json_schema_includes_default() {
        let spec = ParameterSpec::number("max_results", "Maximum number of events").with_default(10);
        let schema = spec.json_schema();

        assert_eq!(schema["type"], "number");
        assert_eq!(schema["default"], 10);
        assert_eq!(schema["description"], "Maximum number of events");
    }

    #[test]
    fn json_schema_omits_absent_default() {
        let schema = ParameterSpec::string("location", "Event location").json_schema();
        assert!(schema.get("default").is_none());
    }
}
