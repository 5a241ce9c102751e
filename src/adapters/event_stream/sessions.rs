//! Session hub for event-stream connections.
//!
//! Each open SSE stream owns a bounded queue. Responses are delivered to
//! the session that made the request; notifications are delivered to the
//! sessions bound to a correlation token.
//!
//! # Architecture
//!
//! ```text
//! sessions:  session-a → queue      bindings:  list_events  → [a, b]
//!            session-b → queue                 create_event → [b]
//! ```
//!
//! Lock order is `sessions` then `bindings` wherever both are held.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc::{self, error::SendTimeoutError, error::TrySendError};
use tokio::sync::RwLock;

use crate::config::TransportConfig;
use crate::domain::authorization::CorrelationToken;
use crate::domain::foundation::SessionId;
use crate::ports::{Notification, NotificationChannel};

use super::messages::{JsonRpcNotification, JsonRpcResponse, SessionMessage};

/// Delivery failures on the event stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("session {0} is closed")]
    SessionClosed(SessionId),

    #[error("timed out delivering to session {0}")]
    DeliveryTimeout(SessionId),
}

/// Registry of open sessions and correlation token bindings.
pub struct SessionHub {
    sessions: RwLock<HashMap<SessionId, mpsc::Sender<SessionMessage>>>,
    bindings: RwLock<HashMap<CorrelationToken, Vec<SessionId>>>,
    buffer: usize,
    send_timeout: Duration,
}

impl SessionHub {
    pub fn new(config: &TransportConfig) -> Self {
        Self::with_settings(config.session_buffer, config.response_send_timeout())
    }

    /// Creates a hub with explicit queue size and response timeout.
    pub fn with_settings(buffer: usize, send_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            bindings: RwLock::new(HashMap::new()),
            buffer: buffer.max(1),
            send_timeout,
        }
    }

    /// Registers a new session and returns the receiving end of its queue.
    pub async fn open_session(&self) -> (SessionId, mpsc::Receiver<SessionMessage>) {
        let (tx, rx) = mpsc::channel(self.buffer);
        let id = SessionId::new();
        self.sessions.write().await.insert(id, tx);
        tracing::debug!(session_id = %id, "Session opened");
        (id, rx)
    }

    /// Removes a session and every binding that points at it.
    ///
    /// Returns false if the session was already gone.
    pub async fn close_session(&self, id: SessionId) -> bool {
        let mut sessions = self.sessions.write().await;
        let existed = sessions.remove(&id).is_some();

        let mut bindings = self.bindings.write().await;
        bindings.retain(|_, bound| {
            bound.retain(|s| *s != id);
            !bound.is_empty()
        });

        if existed {
            tracing::debug!(session_id = %id, "Session closed");
        }
        existed
    }

    pub async fn has_session(&self, id: SessionId) -> bool {
        self.sessions.read().await.contains_key(&id)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Sessions currently waiting on `token`.
    pub async fn bound_sessions(&self, token: &CorrelationToken) -> Vec<SessionId> {
        self.bindings
            .read()
            .await
            .get(token)
            .cloned()
            .unwrap_or_default()
    }

    /// Queues a response for `id`, waiting at most the configured timeout
    /// for room in the queue.
    pub async fn respond(
        &self,
        id: SessionId,
        response: JsonRpcResponse,
    ) -> Result<(), TransportError> {
        let sender = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(TransportError::SessionNotFound(id))?;

        sender
            .send_timeout(SessionMessage::Response(response), self.send_timeout)
            .await
            .map_err(|e| match e {
                SendTimeoutError::Timeout(_) => TransportError::DeliveryTimeout(id),
                SendTimeoutError::Closed(_) => TransportError::SessionClosed(id),
            })
    }
}

#[async_trait]
impl NotificationChannel for SessionHub {
    async fn bind(&self, token: &CorrelationToken, session: SessionId) {
        let sessions = self.sessions.read().await;
        if !sessions.contains_key(&session) {
            tracing::debug!(session_id = %session, correlation_token = %token, "Bind for unknown session ignored");
            return;
        }

        let mut bindings = self.bindings.write().await;
        let bound = bindings.entry(token.clone()).or_default();
        if !bound.contains(&session) {
            bound.push(session);
        }
    }

    async fn notify(&self, token: &CorrelationToken, notification: Notification) -> usize {
        let bound = match self.bindings.write().await.remove(token) {
            Some(bound) => bound,
            None => return 0,
        };

        let message = SessionMessage::Notification(JsonRpcNotification::from(&notification));
        let sessions = self.sessions.read().await;
        let mut delivered = 0;

        for session in bound {
            let sender = match sessions.get(&session) {
                Some(sender) => sender,
                None => continue,
            };
            match sender.try_send(message.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        session_id = %session,
                        correlation_token = %token,
                        "Session queue full, notification dropped"
                    );
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(session_id = %session, "Session closed before notification");
                }
            }
        }

        delivered
    }

    async fn release(&self, token: &CorrelationToken) {
        self.bindings.write().await.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hub(buffer: usize) -> SessionHub {
        SessionHub::with_settings(buffer, Duration::from_millis(50))
    }

    fn token(name: &str) -> CorrelationToken {
        CorrelationToken::new(name).unwrap()
    }

    fn complete(name: &str) -> Notification {
        Notification::authorization_complete(&token(name))
    }

    #[tokio::test]
    async fn notify_reaches_only_bound_sessions() {
        let hub = hub(8);
        let (a, mut rx_a) = hub.open_session().await;
        let (_b, mut rx_b) = hub.open_session().await;
        hub.bind(&token("list_events"), a).await;

        let delivered = hub.notify(&token("list_events"), complete("list_events")).await;

        assert_eq!(delivered, 1);
        assert!(matches!(rx_a.try_recv(), Ok(SessionMessage::Notification(_))));
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn notify_consumes_bindings() {
        let hub = hub(8);
        let (a, _rx) = hub.open_session().await;
        hub.bind(&token("list_events"), a).await;

        assert_eq!(hub.notify(&token("list_events"), complete("list_events")).await, 1);
        assert_eq!(hub.notify(&token("list_events"), complete("list_events")).await, 0);
    }

    #[tokio::test]
    async fn notify_without_binding_is_noop() {
        let hub = hub(8);
        let (_a, mut rx) = hub.open_session().await;

        assert_eq!(hub.notify(&token("get_event"), complete("get_event")).await, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn same_token_from_two_sessions_notifies_both() {
        let hub = hub(8);
        let (a, mut rx_a) = hub.open_session().await;
        let (b, mut rx_b) = hub.open_session().await;
        hub.bind(&token("list_events"), a).await;
        hub.bind(&token("list_events"), b).await;
        hub.bind(&token("list_events"), b).await;

        assert_eq!(hub.notify(&token("list_events"), complete("list_events")).await, 2);
        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_ok());
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn full_queue_drops_notification_without_blocking() {
        let hub = hub(1);
        let (a, mut rx) = hub.open_session().await;
        hub.respond(a, JsonRpcResponse::success(json!(1), json!({})))
            .await
            .unwrap();
        hub.bind(&token("list_events"), a).await;

        let delivered = hub.notify(&token("list_events"), complete("list_events")).await;

        assert_eq!(delivered, 0);
        assert!(matches!(rx.try_recv(), Ok(SessionMessage::Response(_))));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn respond_times_out_on_full_queue() {
        let hub = hub(1);
        let (a, _rx) = hub.open_session().await;
        hub.respond(a, JsonRpcResponse::success(json!(1), json!({})))
            .await
            .unwrap();

        let err = hub
            .respond(a, JsonRpcResponse::success(json!(2), json!({})))
            .await
            .unwrap_err();

        assert_eq!(err, TransportError::DeliveryTimeout(a));
    }

    #[tokio::test]
    async fn respond_to_unknown_or_dropped_session() {
        let hub = hub(4);
        let stranger = SessionId::new();
        assert_eq!(
            hub.respond(stranger, JsonRpcResponse::success(json!(1), json!({})))
                .await
                .unwrap_err(),
            TransportError::SessionNotFound(stranger)
        );

        let (a, rx) = hub.open_session().await;
        drop(rx);
        assert_eq!(
            hub.respond(a, JsonRpcResponse::success(json!(1), json!({})))
                .await
                .unwrap_err(),
            TransportError::SessionClosed(a)
        );
    }

    #[tokio::test]
    async fn close_session_removes_bindings() {
        let hub = hub(4);
        let (a, _rx_a) = hub.open_session().await;
        let (b, _rx_b) = hub.open_session().await;
        hub.bind(&token("list_events"), a).await;
        hub.bind(&token("list_events"), b).await;
        hub.bind(&token("get_event"), a).await;

        assert!(hub.close_session(a).await);
        assert!(!hub.close_session(a).await);

        assert_eq!(hub.bound_sessions(&token("list_events")).await, vec![b]);
        assert!(hub.bound_sessions(&token("get_event")).await.is_empty());
        assert_eq!(hub.session_count().await, 1);
    }

    #[tokio::test]
    async fn bind_ignores_unknown_session() {
        let hub = hub(4);
        hub.bind(&token("list_events"), SessionId::new()).await;
        assert!(hub.bound_sessions(&token("list_events")).await.is_empty());
    }

    #[tokio::test]
    async fn release_drops_bindings() {
        let hub = hub(4);
        let (a, mut rx) = hub.open_session().await;
        hub.bind(&token("list_events"), a).await;

        hub.release(&token("list_events")).await;

        assert_eq!(hub.notify(&token("list_events"), complete("list_events")).await, 0);
        assert!(rx.try_recv().is_err());
    }
}
