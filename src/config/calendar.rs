//! Google Calendar API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::oauth::is_http_url;

/// Remote calendar service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Base URL of the Calendar v3 REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

impl CalendarConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.api_base_url) {
            return Err(ValidationError::InvalidUrl("CALENDAR__API_BASE_URL"));
        }
        if self.http_timeout_secs == 0 || self.http_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            http_timeout_secs: default_http_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}

fn default_http_timeout() -> u64 {
    15
}
