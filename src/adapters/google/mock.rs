//! Mock Google adapters for testing.
//!
//! In-memory implementations of `CalendarService` and `AuthorizationServer`
//! so the dispatcher, authorization flow and HTTP surface can be tested
//! without network access.
//!
//! # Example
//!
//! ```ignore
//! let calendar = MockCalendarService::new()
//!     .with_calendar("primary", "Work")
//!     .with_event("primary", CalendarEvent { id: "evt1".into(), ..Default::default() });
//! let oauth = MockAuthorizationServer::new().with_failing_code("stale");
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;

use crate::domain::authorization::{CorrelationToken, Credential};
use crate::domain::calendar::{CalendarEvent, CalendarSummary, EventQuery, NewEvent};
use crate::domain::foundation::Timestamp;
use crate::ports::{AuthorizationError, AuthorizationServer, CalendarError, CalendarService};

// ════════════════════════════════════════════════════════════════════════════
// Calendar service
// ════════════════════════════════════════════════════════════════════════════

/// Mock calendar service backed by per-calendar event lists.
#[derive(Debug, Default)]
pub struct MockCalendarService {
    calendars: RwLock<Vec<CalendarSummary>>,
    events: RwLock<HashMap<String, Vec<CalendarEvent>>>,
    force_error: RwLock<Option<CalendarError>>,
    calls: Mutex<Vec<String>>,
    seen_tokens: Mutex<Vec<String>>,
    next_id: AtomicUsize,
}

impl MockCalendarService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calendar(self, id: impl Into<String>, summary: impl Into<String>) -> Self {
        self.calendars.write().unwrap().push(CalendarSummary {
            id: id.into(),
            summary: summary.into(),
        });
        self
    }

    pub fn with_event(self, calendar_id: impl Into<String>, event: CalendarEvent) -> Self {
        self.events
            .write()
            .unwrap()
            .entry(calendar_id.into())
            .or_default()
            .push(event);
        self
    }

    /// Forces every call to fail with `error`.
    pub fn with_error(self, error: CalendarError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Operation names in call order, e.g. `["list_calendars", "get_event"]`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Access tokens presented with each call.
    pub fn seen_tokens(&self) -> Vec<String> {
        self.seen_tokens.lock().unwrap().clone()
    }

    pub fn events_in(&self, calendar_id: &str) -> Vec<CalendarEvent> {
        self.events
            .read()
            .unwrap()
            .get(calendar_id)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, operation: &str, credential: &Credential) -> Result<(), CalendarError> {
        self.calls.lock().unwrap().push(operation.to_string());
        self.seen_tokens
            .lock()
            .unwrap()
            .push(credential.access_token().to_string());

        match self.force_error.read().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn not_found() -> CalendarError {
        CalendarError::api(404, "Not Found")
    }
}

#[async_trait]
impl CalendarService for MockCalendarService {
    async fn list_calendars(
        &self,
        credential: &Credential,
    ) -> Result<Vec<CalendarSummary>, CalendarError> {
        self.record("list_calendars", credential)?;
        Ok(self.calendars.read().unwrap().clone())
    }

    async fn list_events(
        &self,
        credential: &Credential,
        query: &EventQuery,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        self.record("list_events", credential)?;
        let events = self.events_in(&query.calendar_id);
        Ok(events
            .into_iter()
            .take(query.max_results as usize)
            .collect())
    }

    async fn create_event(
        &self,
        credential: &Credential,
        event: &NewEvent,
    ) -> Result<CalendarEvent, CalendarError> {
        self.record("create_event", credential)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = CalendarEvent {
            id: format!("evt-{}", id),
            summary: event.summary.clone(),
            description: event.description.clone().unwrap_or_default(),
            location: event.location.clone().unwrap_or_default(),
            status: "confirmed".to_string(),
            html_link: format!("https://calendar.mock.test/event?eid=evt-{}", id),
            start: event.start.clone(),
            end: event.end.clone(),
        };
        self.events
            .write()
            .unwrap()
            .entry(event.calendar_id.clone())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn get_event(
        &self,
        credential: &Credential,
        calendar_id: &str,
        event_id: &str,
    ) -> Result<CalendarEvent, CalendarError> {
        self.record("get_event", credential)?;
        self.events_in(calendar_id)
            .into_iter()
            .find(|e| e.id == event_id)
            .ok_or_else(Self::not_found)
    }

    async fn delete_event(
        &self,
        credential: &Credential,
        calendar_id: &str,
        event_id: &str,
    ) -> Result<(), CalendarError> {
        self.record("delete_event", credential)?;
        let mut events = self.events.write().unwrap();
        let list = events.get_mut(calendar_id).ok_or_else(Self::not_found)?;
        let before = list.len();
        list.retain(|e| e.id != event_id);
        if list.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Authorization server
// ════════════════════════════════════════════════════════════════════════════

/// Mock OAuth2 provider.
///
/// Any code exchanges for `access-{code}` / `refresh-{code}` valid for an
/// hour, unless registered with `with_failing_code`.
#[derive(Debug, Default)]
pub struct MockAuthorizationServer {
    failing_codes: RwLock<HashSet<String>>,
    refresh_error: RwLock<Option<AuthorizationError>>,
    exchanged: Mutex<Vec<String>>,
    refresh_count: AtomicUsize,
}

impl MockAuthorizationServer {
    pub const AUTHORIZE_URL: &'static str = "https://accounts.mock.test/o/oauth2/auth";

    pub fn new() -> Self {
        Self::default()
    }

    /// Makes exchanging `code` fail with `InvalidGrant`.
    pub fn with_failing_code(self, code: impl Into<String>) -> Self {
        self.failing_codes.write().unwrap().insert(code.into());
        self
    }

    /// Makes every refresh fail with `error`.
    pub fn with_refresh_error(self, error: AuthorizationError) -> Self {
        *self.refresh_error.write().unwrap() = Some(error);
        self
    }

    /// Codes passed to `exchange_code`, in order.
    pub fn exchanged_codes(&self) -> Vec<String> {
        self.exchanged.lock().unwrap().clone()
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthorizationServer for MockAuthorizationServer {
    fn authorization_url(&self, state: &CorrelationToken) -> String {
        format!(
            "{}?state={}&access_type=offline",
            Self::AUTHORIZE_URL,
            state
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<Credential, AuthorizationError> {
        self.exchanged.lock().unwrap().push(code.to_string());

        if self.failing_codes.read().unwrap().contains(code) {
            return Err(AuthorizationError::InvalidGrant(
                "invalid_grant: Bad Request".to_string(),
            ));
        }

        Ok(Credential::new(format!("access-{}", code))
            .with_refresh_token(format!("refresh-{}", code))
            .expiring_at(Timestamp::now().plus_secs(3600)))
    }

    async fn refresh(&self, credential: &Credential) -> Result<Credential, AuthorizationError> {
        let count = self.refresh_count.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(error) = self.refresh_error.read().unwrap().clone() {
            return Err(error);
        }
        if !credential.can_refresh() {
            return Err(AuthorizationError::NoRefreshToken);
        }

        Ok(Credential::new(format!("refreshed-{}", count))
            .expiring_at(Timestamp::now().plus_secs(3600))
            .inheriting_refresh_token(credential))
    }
}
