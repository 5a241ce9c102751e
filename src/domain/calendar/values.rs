//! Calendar value objects exchanged with the calendar service port.

use serde::{Deserialize, Serialize};

/// One calendar visible to the authorized account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSummary {
    pub id: String,
    pub summary: String,
}

/// Start or end of an event: a timed instant or an all-day date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTime {
    /// RFC 3339 timestamp for timed events
    pub date_time: Option<String>,
    /// `yyyy-mm-dd` for all-day events
    pub date: Option<String>,
}

impl EventTime {
    pub fn at(date_time: impl Into<String>) -> Self {
        Self {
            date_time: Some(date_time.into()),
            date: None,
        }
    }

    pub fn all_day(date: impl Into<String>) -> Self {
        Self {
            date_time: None,
            date: Some(date.into()),
        }
    }

    /// The timestamp if set, otherwise the date, otherwise empty.
    pub fn display(&self) -> &str {
        self.date_time
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.date.as_deref())
            .unwrap_or("")
    }
}

/// An event as returned by the calendar service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    pub description: String,
    pub location: String,
    pub status: String,
    pub html_link: String,
    pub start: EventTime,
    pub end: EventTime,
}

/// Query for upcoming events in one calendar.
///
/// Always expands recurring events and orders by start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    pub calendar_id: String,
    pub time_min: Option<String>,
    pub time_max: Option<String>,
    pub max_results: u32,
}

impl EventQuery {
    /// Upper bound the calendar API accepts for `maxResults`.
    pub const MAX_RESULTS_LIMIT: u32 = 2500;

    /// Creates a query, clamping `max_results` into `1..=2500`.
    pub fn new(calendar_id: impl Into<String>, max_results: i64) -> Self {
        let clamped = max_results.clamp(1, Self::MAX_RESULTS_LIMIT as i64) as u32;
        Self {
            calendar_id: calendar_id.into(),
            time_min: None,
            time_max: None,
            max_results: clamped,
        }
    }

    pub fn with_time_min(mut self, time_min: Option<&str>) -> Self {
        self.time_min = time_min.map(str::to_string);
        self
    }

    pub fn with_time_max(mut self, time_max: Option<&str>) -> Self {
        self.time_max = time_max.map(str::to_string);
        self
    }
}

/// Event to insert into a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub calendar_id: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}
