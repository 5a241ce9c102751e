//! Google API request and response bodies.
//!
//! Field names follow the Calendar v3 and OAuth2 token endpoint JSON.

use serde::{Deserialize, Serialize};

use crate::domain::authorization::Credential;
use crate::domain::calendar::{CalendarEvent, CalendarSummary, EventTime, NewEvent};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════
// OAuth2 token endpoint
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub(super) struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    token_type: Option<String>,
}

impl TokenResponse {
    pub(super) fn into_credential(self, now: Timestamp) -> Credential {
        let mut credential = Credential::new(self.access_token);
        if let Some(refresh_token) = self.refresh_token.filter(|t| !t.is_empty()) {
            credential = credential.with_refresh_token(refresh_token);
        }
        // An expiry that cannot be represented is treated as none.
        if let Some(expiry) = self.expires_in.and_then(|secs| now.checked_plus_secs(secs)) {
            credential = credential.expiring_at(expiry);
        }
        if let Some(token_type) = self.token_type.filter(|t| !t.is_empty()) {
            credential = credential.with_token_type(token_type);
        }
        credential
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl TokenErrorResponse {
    pub(super) fn describe(&self) -> String {
        match &self.error_description {
            Some(description) => format!("{}: {}", self.error, description),
            None => self.error.clone(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Calendar v3
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub(super) struct CalendarListResponse {
    #[serde(default)]
    pub items: Vec<CalendarListEntry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CalendarListEntry {
    id: String,
    #[serde(default)]
    summary: String,
}

impl From<CalendarListEntry> for CalendarSummary {
    fn from(entry: CalendarListEntry) -> Self {
        CalendarSummary {
            id: entry.id,
            summary: entry.summary,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct EventsResponse {
    #[serde(default)]
    pub items: Vec<EventResource>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EventResource {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    id: String,
    #[serde(default)]
    summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    status: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    html_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<EventDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<EventDateTime>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EventDateTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,
}

impl From<EventDateTime> for EventTime {
    fn from(wire: EventDateTime) -> Self {
        EventTime {
            date_time: wire.date_time,
            date: wire.date,
        }
    }
}

impl From<&EventTime> for EventDateTime {
    fn from(time: &EventTime) -> Self {
        EventDateTime {
            date_time: time.date_time.clone(),
            date: time.date.clone(),
        }
    }
}

impl From<EventResource> for CalendarEvent {
    fn from(resource: EventResource) -> Self {
        CalendarEvent {
            id: resource.id,
            summary: resource.summary,
            description: resource.description,
            location: resource.location,
            status: resource.status,
            html_link: resource.html_link,
            start: resource.start.map(EventTime::from).unwrap_or_default(),
            end: resource.end.map(EventTime::from).unwrap_or_default(),
        }
    }
}

impl From<&NewEvent> for EventResource {
    fn from(event: &NewEvent) -> Self {
        EventResource {
            summary: event.summary.clone(),
            description: event.description.clone().unwrap_or_default(),
            location: event.location.clone().unwrap_or_default(),
            start: Some(EventDateTime::from(&event.start)),
            end: Some(EventDateTime::from(&event.end)),
            ..Default::default()
        }
    }
}

/// `{"error": {"code": 404, "message": "Not Found"}}`
#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}
