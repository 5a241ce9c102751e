//! Calendar Service Port - Interface to the remote calendar API.
//!
//! Every call carries the credential to use, so implementations stay
//! stateless with respect to authorization. Calls are attempted once;
//! retry policy, if any, belongs to the caller.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::authorization::Credential;
use crate::domain::calendar::{CalendarEvent, CalendarSummary, EventQuery, NewEvent};

/// Read/write access to the authorized account's calendars.
#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Lists calendars on the account's calendar list.
    async fn list_calendars(
        &self,
        credential: &Credential,
    ) -> Result<Vec<CalendarSummary>, CalendarError>;

    /// Lists events matching the query, ordered by start time.
    async fn list_events(
        &self,
        credential: &Credential,
        query: &EventQuery,
    ) -> Result<Vec<CalendarEvent>, CalendarError>;

    /// Inserts an event and returns it as stored.
    async fn create_event(
        &self,
        credential: &Credential,
        event: &NewEvent,
    ) -> Result<CalendarEvent, CalendarError>;

    /// Fetches a single event.
    async fn get_event(
        &self,
        credential: &Credential,
        calendar_id: &str,
        event_id: &str,
    ) -> Result<CalendarEvent, CalendarError>;

    /// Deletes a single event.
    async fn delete_event(
        &self,
        credential: &Credential,
        calendar_id: &str,
        event_id: &str,
    ) -> Result<(), CalendarError>;
}

/// Calendar service failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The service rejected the credential (HTTP 401)
    #[error("credential rejected by calendar service")]
    Unauthorized,

    /// Any other non-success status, with a snippet of the body
    #[error("calendar service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Connection failure or timeout
    #[error("calendar service unreachable: {0}")]
    Transport(String),

    /// Response body did not have the expected shape
    #[error("unexpected calendar service response: {0}")]
    Decode(String),
}

impl CalendarError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_includes_status_and_body() {
        let err = CalendarError::api(404, "Not Found");
        assert_eq!(err.to_string(), "calendar service returned 404: Not Found");
    }

    #[test]
    fn calendar_service_is_object_safe() {
        fn assert_object_safe(_: Option<&dyn CalendarService>) {}
        assert_object_safe(None);
    }
}
