//! Notification Channel Port - Out-of-band pushes to waiting sessions.
//!
//! A session that asked for authorization is *bound* to the correlation
//! token. When the authorization completes, `notify` delivers to every
//! bound session and consumes the bindings.
//!
//! # Contract
//!
//! - `notify` never blocks on a slow session; full or closed sessions are skipped
//! - `notify` with no bindings is a no-op returning 0
//! - a session only receives notifications for tokens bound to it

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::authorization::CorrelationToken;
use crate::domain::foundation::SessionId;

/// Asynchronous event pushed to sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    /// A credential was installed for the correlated request
    AuthorizationComplete {
        correlation_token: CorrelationToken,
        message: String,
    },
}

impl Notification {
    pub fn authorization_complete(token: &CorrelationToken) -> Self {
        Self::AuthorizationComplete {
            correlation_token: token.clone(),
            message: format!(
                "Authorization complete. You can now retry `{}`.",
                token
            ),
        }
    }

    pub fn correlation_token(&self) -> &CorrelationToken {
        match self {
            Self::AuthorizationComplete {
                correlation_token, ..
            } => correlation_token,
        }
    }
}

/// Routes notifications to the sessions waiting on a correlation token.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Registers `session` as waiting on `token`.
    async fn bind(&self, token: &CorrelationToken, session: SessionId);

    /// Delivers to every session bound to `token`, consuming the bindings.
    ///
    /// Returns the number of sessions the notification was queued for.
    async fn notify(&self, token: &CorrelationToken, notification: Notification) -> usize;

    /// Drops the bindings for `token` without delivering anything.
    async fn release(&self, token: &CorrelationToken);
}
