//! Built-in calendar tool catalog.

use super::{ParameterSpec, ToolDefinition, ToolRegistry, ToolRegistryError};

pub const AUTH: &str = "auth";
pub const GET_CURRENT_TIME: &str = "get_current_time";
pub const LIST_CALENDARS: &str = "list_calendars";
pub const LIST_EVENTS: &str = "list_events";
pub const CREATE_EVENT: &str = "create_event";
pub const GET_EVENT: &str = "get_event";
pub const DELETE_EVENT: &str = "delete_event";

/// Parameter names shared across tools.
pub mod params {
    pub const CALENDAR_ID: &str = "calendar_id";
    pub const TIME_MIN: &str = "time_min";
    pub const TIME_MAX: &str = "time_max";
    pub const MAX_RESULTS: &str = "max_results";
    pub const SUMMARY: &str = "summary";
    pub const DESCRIPTION: &str = "description";
    pub const LOCATION: &str = "location";
    pub const START_TIME: &str = "start_time";
    pub const END_TIME: &str = "end_time";
    pub const EVENT_ID: &str = "event_id";
    pub const FOR_METHOD: &str = "for_method";
    pub const TIMEZONE: &str = "timezone";
}

pub const DEFAULT_CALENDAR_ID: &str = "primary";
pub const DEFAULT_MAX_RESULTS: i64 = 10;
pub const DEFAULT_TIMEZONE: &str = "UTC";

fn calendar_id() -> ParameterSpec {
    ParameterSpec::string(
        params::CALENDAR_ID,
        "The calendar ID (use 'primary' for primary calendar)",
    )
    .with_default(DEFAULT_CALENDAR_ID)
}

/// All built-in tool definitions in listing order.
pub fn calendar_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(AUTH, "Authenticate with Google Calendar to use the other tools.")
            .with_parameter(
                ParameterSpec::string(
                    params::FOR_METHOD,
                    "Name of the tool you want to call once authenticated",
                )
                .required(),
            ),
        ToolDefinition::new(GET_CURRENT_TIME, "Get the current date and time")
            .with_parameter(
                ParameterSpec::string(
                    params::TIMEZONE,
                    "Timezone as UTC or a fixed offset such as +05:30",
                )
                .with_default(DEFAULT_TIMEZONE),
            ),
        ToolDefinition::new(LIST_CALENDARS, "List all accessible Google Calendars")
            .requiring_authentication(),
        ToolDefinition::new(LIST_EVENTS, "List events from a Google Calendar")
            .with_parameter(calendar_id())
            .with_parameter(ParameterSpec::string(
                params::TIME_MIN,
                "Lower bound for event start time (RFC3339 format, e.g., '2024-01-01T00:00:00Z')",
            ))
            .with_parameter(ParameterSpec::string(
                params::TIME_MAX,
                "Upper bound for event start time (RFC3339 format, e.g., '2024-12-31T23:59:59Z')",
            ))
            .with_parameter(
                ParameterSpec::number(params::MAX_RESULTS, "Maximum number of events to return")
                    .with_default(DEFAULT_MAX_RESULTS),
            )
            .requiring_authentication(),
        ToolDefinition::new(CREATE_EVENT, "Create a new event in Google Calendar")
            .with_parameter(calendar_id())
            .with_parameter(ParameterSpec::string(params::SUMMARY, "Event title/summary").required())
            .with_parameter(ParameterSpec::string(
                params::DESCRIPTION,
                "Event description (optional)",
            ))
            .with_parameter(
                ParameterSpec::string(
                    params::START_TIME,
                    "Event start time (RFC3339 format, e.g., '2024-01-01T10:00:00Z')",
                )
                .required(),
            )
            .with_parameter(
                ParameterSpec::string(
                    params::END_TIME,
                    "Event end time (RFC3339 format, e.g., '2024-01-01T11:00:00Z')",
                )
                .required(),
            )
            .with_parameter(ParameterSpec::string(params::LOCATION, "Event location (optional)"))
            .requiring_authentication(),
        ToolDefinition::new(GET_EVENT, "Get details of a specific event")
            .with_parameter(calendar_id())
            .with_parameter(ParameterSpec::string(params::EVENT_ID, "The event ID").required())
            .requiring_authentication(),
        ToolDefinition::new(DELETE_EVENT, "Delete an event from Google Calendar")
            .with_parameter(calendar_id())
            .with_parameter(
                ParameterSpec::string(params::EVENT_ID, "The event ID to delete").required(),
            )
            .requiring_authentication(),
    ]
}

/// Builds the registry of built-in tools.
pub fn calendar_registry() -> Result<ToolRegistry, ToolRegistryError> {
    let mut registry = ToolRegistry::new();
    for definition in calendar_tools() {
        registry.register(definition)?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_seven_tools_in_order() {
        let registry = calendar_registry().unwrap();
        let names: Vec<&str> = registry.definitions().iter().map(|d| d.name()).collect();

        assert_eq!(
            names,
            vec![
                AUTH,
                GET_CURRENT_TIME,
                LIST_CALENDARS,
                LIST_EVENTS,
                CREATE_EVENT,
                GET_EVENT,
                DELETE_EVENT
            ]
        );
    }

    #[test]
    fn only_auth_and_clock_skip_authentication() {
        let registry = calendar_registry().unwrap();
        let public: Vec<&str> = registry
            .definitions()
            .iter()
            .filter(|d| !d.requires_authentication())
            .map(|d| d.name())
            .collect();

        assert_eq!(public, vec![AUTH, GET_CURRENT_TIME]);
    }

    #[test]
    fn create_event_requires_summary_and_times() {
        let registry = calendar_registry().unwrap();
        let schema = registry.resolve(CREATE_EVENT).unwrap().input_schema();

        assert_eq!(
            schema["required"],
            serde_json::json!([params::SUMMARY, params::START_TIME, params::END_TIME])
        );
    }

    #[test]
    fn list_events_defaults() {
        let registry = calendar_registry().unwrap();
        let def = registry.resolve(LIST_EVENTS).unwrap();
        let args = def.validate(&serde_json::json!({})).unwrap();

        assert_eq!(args.optional_string(params::CALENDAR_ID), Some("primary"));
        assert_eq!(args.optional_integer(params::MAX_RESULTS), Some(10));
    }

    #[test]
    fn auth_requires_for_method() {
        let registry = calendar_registry().unwrap();
        let def = registry.resolve(AUTH).unwrap();
        assert!(def.validate(&serde_json::json!({})).is_err());
    }
}
