//! Tool definition - schema and metadata for a tool.
//!
//! Defines the interface of an operation a connected agent can invoke,
//! together with whether it needs a live calendar credential.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Number, Value};

use super::{ArgumentError, ParameterKind, ParameterSpec, ToolArguments};

/// Definition of a tool that can be invoked over the event stream.
///
/// Contains the schema and documentation needed for:
/// - the MCP `tools/list` response
/// - OpenAI / Anthropic tool catalogs served by the REST API
/// - argument validation before dispatch
///
/// # Examples
///
/// ```
/// use calendar_mcp::domain::tools::{ParameterSpec, ToolDefinition};
///
/// let definition = ToolDefinition::new("get_event", "Get details of a specific event")
///     .with_parameter(ParameterSpec::string("calendar_id", "The calendar ID").with_default("primary"))
///     .with_parameter(ParameterSpec::string("event_id", "The event ID").required())
///     .requiring_authentication();
///
/// assert_eq!(definition.parameters().len(), 2);
/// assert!(definition.requires_authentication());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "list_events")
    name: String,

    /// Human-readable description for agents and docs
    description: String,

    /// Parameters in declaration order
    parameters: Vec<ParameterSpec>,

    /// Whether a live credential must exist before the tool runs
    requires_authentication: bool,
}

impl ToolDefinition {
    /// Creates a tool definition with no parameters that runs without a credential.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            requires_authentication: false,
        }
    }

    /// Appends a parameter.
    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Marks the tool as needing a live credential.
    pub fn requiring_authentication(mut self) -> Self {
        self.requires_authentication = true;
        self
    }

    /// Returns the tool name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the parameters in declaration order.
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// Looks up a declared parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name() == name)
    }

    pub fn requires_authentication(&self) -> bool {
        self.requires_authentication
    }

    /// Checks raw arguments against the declared parameters.
    ///
    /// `null` is treated as an empty object. Empty strings count as absent.
    /// Numbers supplied as numeric strings are coerced. Undeclared keys are
    /// dropped.
    pub fn validate(&self, arguments: &Value) -> Result<ToolArguments, ArgumentError> {
        let empty = Map::new();
        let raw = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            _ => return Err(ArgumentError::NotAnObject),
        };

        let mut values = Map::new();
        for spec in &self.parameters {
            match raw.get(spec.name()).filter(|v| !is_absent(v)) {
                Some(value) => {
                    values.insert(spec.name().to_string(), coerce(spec, value)?);
                }
                None if spec.is_required() => {
                    return Err(ArgumentError::missing(spec.name()));
                }
                None => {
                    if let Some(default) = spec.default_value() {
                        values.insert(spec.name().to_string(), default.clone());
                    }
                }
            }
        }

        Ok(ToolArguments::from_validated(values))
    }

    /// JSON Schema object describing the tool's input.
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name().to_string(), p.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.is_required())
            .map(|p| p.name())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Converts to the MCP `tools/list` entry format.
    pub fn to_mcp_format(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema()
        })
    }

    /// Converts to OpenAI tool format.
    pub fn to_openai_format(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.input_schema()
            }
        })
    }

    /// Converts to Anthropic tool format.
    pub fn to_anthropic_format(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "input_schema": self.input_schema()
        })
    }
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn coerce(spec: &ParameterSpec, value: &Value) -> Result<Value, ArgumentError> {
    match (spec.kind(), value) {
        (ParameterKind::String, Value::String(_)) => Ok(value.clone()),
        (ParameterKind::Number, Value::Number(_)) => Ok(value.clone()),
        (ParameterKind::Number, Value::String(s)) => parse_number(s.trim())
            .map(Value::Number)
            .ok_or_else(|| ArgumentError::wrong_type(spec.name(), ParameterKind::Number)),
        (kind, _) => Err(ArgumentError::wrong_type(spec.name(), kind)),
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Number::from(int));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_events() -> ToolDefinition {
        ToolDefinition::new("list_events", "List events from a Google Calendar")
            .with_parameter(
                ParameterSpec::string("calendar_id", "The calendar ID").with_default("primary"),
            )
            .with_parameter(ParameterSpec::string("time_min", "Lower bound"))
            .with_parameter(ParameterSpec::number("max_results", "Maximum").with_default(10))
            .requiring_authentication()
    }

    fn delete_event() -> ToolDefinition {
        ToolDefinition::new("delete_event", "Delete an event")
            .with_parameter(
                ParameterSpec::string("calendar_id", "The calendar ID").with_default("primary"),
            )
            .with_parameter(ParameterSpec::string("event_id", "The event ID").required())
    }

    #[test]
    fn new_creates_public_definition() {
        let def = ToolDefinition::new("auth", "Authenticate");
        assert_eq!(def.name(), "auth");
        assert!(!def.requires_authentication());
        assert!(def.parameters().is_empty());
    }

    #[test]
    fn validate_applies_defaults() {
        let args = list_events().validate(&json!({})).unwrap();
        assert_eq!(args.optional_string("calendar_id"), Some("primary"));
        assert_eq!(args.optional_integer("max_results"), Some(10));
        assert!(!args.contains("time_min"));
    }

    #[test]
    fn validate_treats_null_as_empty_object() {
        let args = list_events().validate(&Value::Null).unwrap();
        assert_eq!(args.optional_string("calendar_id"), Some("primary"));
    }

    #[test]
    fn validate_rejects_non_object() {
        assert_eq!(
            list_events().validate(&json!(["primary"])),
            Err(ArgumentError::NotAnObject)
        );
    }

    #[test]
    fn validate_reports_missing_required() {
        let err = delete_event().validate(&json!({})).unwrap_err();
        assert_eq!(err, ArgumentError::missing("event_id"));
    }

    #[test]
    fn validate_treats_empty_string_as_absent() {
        let err = delete_event().validate(&json!({"event_id": ""})).unwrap_err();
        assert_eq!(err, ArgumentError::missing("event_id"));

        let args = list_events().validate(&json!({"calendar_id": ""})).unwrap();
        assert_eq!(args.optional_string("calendar_id"), Some("primary"));
    }

    #[test]
    fn validate_coerces_numeric_strings() {
        let args = list_events().validate(&json!({"max_results": "25"})).unwrap();
        assert_eq!(args.optional_integer("max_results"), Some(25));

        let args = list_events().validate(&json!({"max_results": " 2.5 "})).unwrap();
        assert_eq!(args.number("max_results"), Ok(2.5));
    }

    #[test]
    fn validate_rejects_wrong_types() {
        let err = list_events()
            .validate(&json!({"max_results": "many"}))
            .unwrap_err();
        assert_eq!(err, ArgumentError::wrong_type("max_results", ParameterKind::Number));

        let err = delete_event().validate(&json!({"event_id": 42})).unwrap_err();
        assert_eq!(err, ArgumentError::wrong_type("event_id", ParameterKind::String));
    }

    #[test]
    fn validate_drops_undeclared_arguments() {
        let args = delete_event()
            .validate(&json!({"event_id": "e1", "color": "red"}))
            .unwrap();
        assert!(!args.contains("color"));
        assert_eq!(args.string("event_id"), Ok("e1"));
    }

    #[test]
    fn input_schema_lists_properties_and_required() {
        let schema = delete_event().input_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["calendar_id"]["default"], "primary");
        assert_eq!(schema["required"], json!(["event_id"]));
    }

    #[test]
    fn to_mcp_format_uses_camel_case_schema_key() {
        let mcp = delete_event().to_mcp_format();
        assert_eq!(mcp["name"], "delete_event");
        assert!(mcp["inputSchema"].is_object());
    }

    #[test]
    fn to_openai_format_has_correct_structure() {
        let openai = list_events().to_openai_format();

        assert_eq!(openai["type"], "function");
        assert_eq!(openai["function"]["name"], "list_events");
        assert!(openai["function"]["parameters"].is_object());
    }

    #[test]
    fn to_anthropic_format_has_correct_structure() {
        let anthropic = list_events().to_anthropic_format();

        assert_eq!(anthropic["name"], "list_events");
        assert!(anthropic["input_schema"].is_object());
    }
}
