//! CalendarProxy - Translates validated tool arguments into calendar calls.
//!
//! Every outcome is rendered as text. Failures from the calendar service
//! become `ServiceError` results carrying the same wording the tools have
//! always used, e.g. `Error listing events: ...`.

use std::sync::Arc;

use crate::domain::authorization::{Credential, CredentialReader};
use crate::domain::calendar::{EventQuery, EventTime, NewEvent};
use crate::domain::tools::catalog::{self, params, DEFAULT_CALENDAR_ID, DEFAULT_MAX_RESULTS};
use crate::domain::tools::{ToolArguments, ToolResult};
use crate::ports::{CalendarError, CalendarService};

/// Executes the calendar tools against a `CalendarService`.
pub struct CalendarProxy {
    calendar: Arc<dyn CalendarService>,
    credentials: CredentialReader,
}

impl CalendarProxy {
    pub fn new(calendar: Arc<dyn CalendarService>, credentials: CredentialReader) -> Self {
        Self {
            calendar,
            credentials,
        }
    }

    /// Runs `tool_name` with already validated arguments.
    ///
    /// Without a live credential this answers `AuthenticationRequired`
    /// and never reaches the calendar service.
    pub async fn execute(&self, tool_name: &str, arguments: &ToolArguments) -> ToolResult {
        let credential = match self.credentials.current().await {
            Some(credential) => credential,
            None => return ToolResult::authentication_required(tool_name),
        };

        let outcome = match tool_name {
            catalog::LIST_CALENDARS => self.list_calendars(&credential).await,
            catalog::LIST_EVENTS => self.list_events(&credential, arguments).await,
            catalog::CREATE_EVENT => self.create_event(&credential, arguments).await,
            catalog::GET_EVENT => self.get_event(&credential, arguments).await,
            catalog::DELETE_EVENT => self.delete_event(&credential, arguments).await,
            other => return ToolResult::unknown_tool(other),
        };

        match outcome {
            Ok(text) => ToolResult::success(text),
            Err(text) => {
                tracing::warn!(tool = %tool_name, error = %text, "Calendar call failed");
                ToolResult::service_error(text)
            }
        }
    }

    async fn list_calendars(&self, credential: &Credential) -> Result<String, String> {
        let calendars = self
            .calendar
            .list_calendars(credential)
            .await
            .map_err(|e| failure("listing calendars", e))?;

        let mut text = String::from("Available Calendars:\n");
        for calendar in &calendars {
            text.push_str(&format!("- {} (ID: {})\n", calendar.summary, calendar.id));
        }
        Ok(text)
    }

    async fn list_events(
        &self,
        credential: &Credential,
        arguments: &ToolArguments,
    ) -> Result<String, String> {
        let calendar_id = calendar_id(arguments);
        let max_results = arguments
            .optional_integer(params::MAX_RESULTS)
            .unwrap_or(DEFAULT_MAX_RESULTS);
        let query = EventQuery::new(calendar_id, max_results)
            .with_time_min(arguments.optional_string(params::TIME_MIN))
            .with_time_max(arguments.optional_string(params::TIME_MAX));

        let events = self
            .calendar
            .list_events(credential, &query)
            .await
            .map_err(|e| failure("listing events", e))?;

        if events.is_empty() {
            return Ok("No events found.".to_string());
        }

        let mut text = format!("Events in calendar {}:\n", calendar_id);
        for event in &events {
            text.push_str(&format!("- {} ({})\n", event.summary, event.start.display()));
        }
        Ok(text)
    }

    async fn create_event(
        &self,
        credential: &Credential,
        arguments: &ToolArguments,
    ) -> Result<String, String> {
        let event = NewEvent {
            calendar_id: calendar_id(arguments).to_string(),
            summary: required(arguments, params::SUMMARY)?.to_string(),
            description: arguments
                .optional_string(params::DESCRIPTION)
                .map(str::to_string),
            location: arguments.optional_string(params::LOCATION).map(str::to_string),
            start: EventTime::at(required(arguments, params::START_TIME)?),
            end: EventTime::at(required(arguments, params::END_TIME)?),
        };

        let created = self
            .calendar
            .create_event(credential, &event)
            .await
            .map_err(|e| failure("creating event", e))?;

        Ok(format!(
            "Event created successfully!\nTitle: {}\nID: {}\nHTML Link: {}",
            created.summary, created.id, created.html_link
        ))
    }

    async fn get_event(
        &self,
        credential: &Credential,
        arguments: &ToolArguments,
    ) -> Result<String, String> {
        let calendar_id = calendar_id(arguments);
        let event_id = required(arguments, params::EVENT_ID)?;

        let event = self
            .calendar
            .get_event(credential, calendar_id, event_id)
            .await
            .map_err(|e| failure("getting event", e))?;

        Ok(format!(
            "Event Details:\nTitle: {}\nDescription: {}\nStart: {}\nEnd: {}\nLocation: {}\nStatus: {}\nHTML Link: {}",
            event.summary,
            event.description,
            event.start.display(),
            event.end.display(),
            event.location,
            event.status,
            event.html_link
        ))
    }

    async fn delete_event(
        &self,
        credential: &Credential,
        arguments: &ToolArguments,
    ) -> Result<String, String> {
        let calendar_id = calendar_id(arguments);
        let event_id = required(arguments, params::EVENT_ID)?;

        self.calendar
            .delete_event(credential, calendar_id, event_id)
            .await
            .map_err(|e| failure("deleting event", e))?;

        Ok(format!(
            "Event {} deleted successfully from calendar {}",
            event_id, calendar_id
        ))
    }
}

fn calendar_id(arguments: &ToolArguments) -> &str {
    arguments
        .optional_string(params::CALENDAR_ID)
        .unwrap_or(DEFAULT_CALENDAR_ID)
}

fn required<'a>(arguments: &'a ToolArguments, name: &str) -> Result<&'a str, String> {
    arguments.string(name).map_err(|e| e.to_string())
}

fn failure(action: &str, error: CalendarError) -> String {
    format!("Error {}: {}", action, error)
}
