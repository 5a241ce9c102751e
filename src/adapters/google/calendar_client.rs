//! Google Calendar v3 client - Implementation of `CalendarService`.
//!
//! Every call sends the caller's credential as a bearer token. Calendar
//! and event IDs are percent-encoded as path segments.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::CalendarConfig;
use crate::domain::authorization::Credential;
use crate::domain::calendar::{CalendarEvent, CalendarSummary, EventQuery, NewEvent};
use crate::ports::{CalendarError, CalendarService};

use super::wire::{ApiErrorResponse, CalendarListResponse, EventResource, EventsResponse};
use super::{body_snippet, parse_url, GoogleClientError};

/// Calendar API client.
pub struct GoogleCalendarClient {
    client: Client,
    base_url: Url,
}

impl GoogleCalendarClient {
    pub fn new(config: &CalendarConfig) -> Result<Self, GoogleClientError> {
        let client = Client::builder().timeout(config.http_timeout()).build()?;
        let base_url = parse_url(&config.api_base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(GoogleClientError::InvalidUrl {
                url: config.api_base_url.clone(),
                reason: "cannot be used as a base URL".to_string(),
            });
        }

        Ok(Self { client, base_url })
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn events_endpoint(&self, calendar_id: &str) -> Url {
        self.endpoint(&["calendars", calendar_id, "events"])
    }

    fn event_endpoint(&self, calendar_id: &str, event_id: &str) -> Url {
        self.endpoint(&["calendars", calendar_id, "events", event_id])
    }

    /// Sends a request and maps transport and status failures.
    async fn send(
        &self,
        request: RequestBuilder,
        credential: &Credential,
    ) -> Result<Response, CalendarError> {
        let response = request
            .bearer_auth(credential.access_token())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CalendarError::Transport(format!("request timed out: {}", e))
                } else if e.is_connect() {
                    CalendarError::Transport(format!("connection failed: {}", e))
                } else {
                    CalendarError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED {
            return Err(CalendarError::Unauthorized);
        }
        let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.message,
            _ => body_snippet(&body),
        };
        Err(CalendarError::api(status.as_u16(), message))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, CalendarError> {
        response
            .json::<T>()
            .await
            .map_err(|e| CalendarError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CalendarService for GoogleCalendarClient {
    async fn list_calendars(
        &self,
        credential: &Credential,
    ) -> Result<Vec<CalendarSummary>, CalendarError> {
        let url = self.endpoint(&["users", "me", "calendarList"]);
        let response = self.send(self.client.get(url), credential).await?;
        let list: CalendarListResponse = Self::decode(response).await?;

        Ok(list.items.into_iter().map(CalendarSummary::from).collect())
    }

    async fn list_events(
        &self,
        credential: &Credential,
        query: &EventQuery,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        let mut params: Vec<(&str, String)> = vec![
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
            ("maxResults", query.max_results.to_string()),
        ];
        if let Some(time_min) = &query.time_min {
            params.push(("timeMin", time_min.clone()));
        }
        if let Some(time_max) = &query.time_max {
            params.push(("timeMax", time_max.clone()));
        }

        let request = self
            .client
            .get(self.events_endpoint(&query.calendar_id))
            .query(&params);
        let response = self.send(request, credential).await?;
        let events: EventsResponse = Self::decode(response).await?;

        Ok(events.items.into_iter().map(CalendarEvent::from).collect())
    }

    async fn create_event(
        &self,
        credential: &Credential,
        event: &NewEvent,
    ) -> Result<CalendarEvent, CalendarError> {
        let request = self
            .client
            .post(self.events_endpoint(&event.calendar_id))
            .json(&EventResource::from(event));
        let response = self.send(request, credential).await?;
        let created: EventResource = Self::decode(response).await?;

        Ok(created.into())
    }

    async fn get_event(
        &self,
        credential: &Credential,
        calendar_id: &str,
        event_id: &str,
    ) -> Result<CalendarEvent, CalendarError> {
        let request = self.client.get(self.event_endpoint(calendar_id, event_id));
        let response = self.send(request, credential).await?;
        let event: EventResource = Self::decode(response).await?;

        Ok(event.into())
    }

    async fn delete_event(
        &self,
        credential: &Credential,
        calendar_id: &str,
        event_id: &str,
    ) -> Result<(), CalendarError> {
        let request = self.client.delete(self.event_endpoint(calendar_id, event_id));
        self.send(request, credential).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn client_for(base: &str) -> GoogleCalendarClient {
        GoogleCalendarClient::new(&CalendarConfig {
            api_base_url: base.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer ya29.test")
    }

    async fn calendar_list(headers: HeaderMap) -> (StatusCode, Json<Value>) {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({})));
        }
        (
            StatusCode::OK,
            Json(json!({"items": [
                {"id": "primary", "summary": "Work"},
                {"id": "family@group.calendar.google.com", "summary": "Family"}
            ]})),
        )
    }

    async fn events(
        Path(calendar_id): Path<String>,
        Query(query): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        Json(json!({"items": [{
            "id": "evt1",
            "summary": format!("{} in {}", query.get("maxResults").cloned().unwrap_or_default(), calendar_id),
            "start": {"dateTime": "2024-01-01T10:00:00Z"},
            "end": {"dateTime": "2024-01-01T11:00:00Z"},
            "status": query.get("orderBy").cloned().unwrap_or_default()
        }]}))
    }

    async fn missing_event() -> (StatusCode, Json<Value>) {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"code": 404, "message": "Not Found"}})),
        )
    }

    async fn spawn_calendar_api() -> String {
        let app = Router::new()
            .route("/calendar/v3/users/me/calendarList", get(calendar_list))
            .route("/calendar/v3/calendars/:calendar_id/events", get(events))
            .route(
                "/calendar/v3/calendars/:calendar_id/events/:event_id",
                get(missing_event).delete(missing_event),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/calendar/v3", addr)
    }

    #[test]
    fn endpoint_percent_encodes_ids() {
        let client = client_for("https://www.googleapis.com/calendar/v3/");
        let url = client.event_endpoint("team#1@group.calendar.google.com", "a/b");

        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/calendar/v3/calendars/team%231@group.calendar.google.com/events/a%2Fb"
        );
    }

    #[tokio::test]
    async fn list_calendars_sends_bearer_token() {
        let client = client_for(&spawn_calendar_api().await);

        let calendars = client
            .list_calendars(&Credential::new("ya29.test"))
            .await
            .unwrap();

        assert_eq!(calendars.len(), 2);
        assert_eq!(calendars[1].summary, "Family");
    }

    #[tokio::test]
    async fn rejected_token_maps_to_unauthorized() {
        let client = client_for(&spawn_calendar_api().await);

        let err = client
            .list_calendars(&Credential::new("ya29.wrong"))
            .await
            .unwrap_err();

        assert_eq!(err, CalendarError::Unauthorized);
    }

    #[tokio::test]
    async fn list_events_sends_query_parameters() {
        let client = client_for(&spawn_calendar_api().await);

        let events = client
            .list_events(&Credential::new("ya29.test"), &EventQuery::new("primary", 2))
            .await
            .unwrap();

        assert_eq!(events[0].summary, "2 in primary");
        assert_eq!(events[0].status, "startTime");
        assert_eq!(events[0].start.display(), "2024-01-01T10:00:00Z");
    }

    #[tokio::test]
    async fn api_errors_carry_google_message() {
        let client = client_for(&spawn_calendar_api().await);

        let err = client
            .get_event(&Credential::new("ya29.test"), "primary", "nope")
            .await
            .unwrap_err();

        assert_eq!(err, CalendarError::api(404, "Not Found"));
    }

    #[tokio::test]
    async fn delete_surfaces_status() {
        let client = client_for(&spawn_calendar_api().await);

        let err = client
            .delete_event(&Credential::new("ya29.test"), "primary", "nope")
            .await
            .unwrap_err();

        assert!(matches!(err, CalendarError::Api { status: 404, .. }));
    }
}
