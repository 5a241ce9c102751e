//! Calendar domain - value objects for calendars and events.

mod values;

pub use values::{CalendarEvent, CalendarSummary, EventQuery, EventTime, NewEvent};
