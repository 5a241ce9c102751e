//! Event-stream transport configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Tuning for per-session push channels.
#[derive(Debug, Clone, Deserialize)]
pub struct TransportConfig {
    /// Bounded buffer size of each session's outbound channel
    #[serde(default = "default_session_buffer")]
    pub session_buffer: usize,

    /// How long a tool response may wait for buffer space, in milliseconds
    #[serde(default = "default_response_send_timeout")]
    pub response_send_timeout_ms: u64,

    /// SSE keep-alive comment interval, in seconds
    #[serde(default = "default_keep_alive")]
    pub keep_alive_secs: u64,
}

impl TransportConfig {
    pub fn response_send_timeout(&self) -> Duration {
        Duration::from_millis(self.response_send_timeout_ms)
    }

    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_buffer == 0 || self.session_buffer > 4096 {
            return Err(ValidationError::InvalidSessionBuffer);
        }
        if self.response_send_timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.keep_alive_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            session_buffer: default_session_buffer(),
            response_send_timeout_ms: default_response_send_timeout(),
            keep_alive_secs: default_keep_alive(),
        }
    }
}

fn default_session_buffer() -> usize {
    64
}

fn default_response_send_timeout() -> u64 {
    5_000
}

fn default_keep_alive() -> u64 {
    15
}
