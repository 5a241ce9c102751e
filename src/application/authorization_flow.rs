//! AuthorizationFlowManager - Deferred OAuth2 authorization.
//!
//! Hands out consent URLs keyed by a correlation token, completes the
//! exchange when the provider redirects back, installs the credential and
//! tells the waiting sessions. It owns the only `CredentialWriter`.
//!
//! # Lifecycle of a pending authorization
//!
//! `Requested → CallbackReceived → Exchanged → Notified`, or
//! `CallbackReceived → Failed` when the code exchange is rejected. Failed
//! entries stay in the table until the TTL evicts them or a new `auth`
//! request for the same token replaces them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::config::OAuthConfig;
use crate::domain::authorization::{
    AuthorizationStatus, CorrelationToken, Credential, CredentialReader, CredentialWriter,
    PendingAuthorization, PendingAuthorizations,
};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::{AuthorizationError, AuthorizationServer, Notification, NotificationChannel};

/// Credentials expiring within this many seconds are treated as expired.
pub const EXPIRY_SKEW_SECS: i64 = 60;

/// Bounds for the pending authorization table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationFlowConfig {
    pub pending_ttl: Duration,
    pub max_pending: usize,
}

impl Default for AuthorizationFlowConfig {
    fn default() -> Self {
        Self {
            pending_ttl: Duration::from_secs(900),
            max_pending: 256,
        }
    }
}

impl From<&OAuthConfig> for AuthorizationFlowConfig {
    fn from(config: &OAuthConfig) -> Self {
        Self {
            pending_ttl: config.pending_ttl(),
            max_pending: config.max_pending,
        }
    }
}

/// Outcome of a successful callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedAuthorization {
    pub token: CorrelationToken,
    /// Sessions the completion notification was queued for
    pub notified_sessions: usize,
    /// False when the token was unknown or already evicted
    pub was_pending: bool,
}

/// Coordinates consent URLs, code exchange, credential install and
/// notification.
pub struct AuthorizationFlowManager {
    server: Arc<dyn AuthorizationServer>,
    channel: Arc<dyn NotificationChannel>,
    writer: CredentialWriter,
    reader: CredentialReader,
    pending: Mutex<PendingAuthorizations>,
    refresh_lock: Mutex<()>,
}

impl AuthorizationFlowManager {
    pub fn new(
        server: Arc<dyn AuthorizationServer>,
        channel: Arc<dyn NotificationChannel>,
        writer: CredentialWriter,
        config: AuthorizationFlowConfig,
    ) -> Self {
        let reader = writer.reader();
        Self {
            server,
            channel,
            writer,
            reader,
            pending: Mutex::new(PendingAuthorizations::new(
                config.pending_ttl,
                config.max_pending,
            )),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns a consent URL for `token` and binds `session` to it.
    ///
    /// The binding is in place before the URL is returned, so the
    /// completion notification cannot overtake it.
    pub async fn begin_authorization(
        &self,
        token: &CorrelationToken,
        session: Option<SessionId>,
    ) -> String {
        self.begin_authorization_at(token, session, Timestamp::now())
            .await
    }

    pub(crate) async fn begin_authorization_at(
        &self,
        token: &CorrelationToken,
        session: Option<SessionId>,
        now: Timestamp,
    ) -> String {
        // 1. Build the provider URL carrying the token as state
        let url = self.server.authorization_url(token);

        // 2. Record the request, dropping stale and overflow entries
        let mut pending = self.pending.lock().await;
        let mut dropped = pending.evict_expired(now);
        dropped.extend(pending.record(token.clone(), url.clone(), session, now));
        for stale in &dropped {
            self.channel.release(stale).await;
        }

        // 3. Bind the session while the table is still locked
        if let Some(session) = session {
            self.channel.bind(token, session).await;
        }
        drop(pending);

        tracing::info!(
            correlation_token = %token,
            session_id = ?session.map(|s| s.to_string()),
            dropped = dropped.len(),
            "Authorization requested"
        );

        url
    }

    /// Handles the provider redirect for `token`.
    ///
    /// The code is exchanged even when `token` is not pending, so a late
    /// callback still installs a credential. Exchange failures leave the
    /// entry marked `Failed` and nobody is notified.
    pub async fn complete_authorization(
        &self,
        code: &str,
        token: &CorrelationToken,
    ) -> Result<CompletedAuthorization, AuthorizationError> {
        // 1. Claim the pending entry; it stays in the table during the exchange
        let was_pending = self.pending.lock().await.claim_for_callback(token);

        // 2. Exchange the code
        let credential = match self.server.exchange_code(code).await {
            Ok(credential) => credential,
            Err(err) => {
                tracing::warn!(correlation_token = %token, error = %err, "Code exchange failed");
                if was_pending {
                    self.pending.lock().await.fail_claimed(token);
                }
                return Err(err);
            }
        };

        // 3. Install the credential; the last install wins
        let replaced = self.writer.install(credential).await.is_some();
        let mut entry = if was_pending {
            self.pending.lock().await.complete_claimed(token)
        } else {
            None
        };
        advance(&mut entry, AuthorizationStatus::Exchanged);

        // 4. Notify every session bound to the token
        let notified_sessions = self
            .channel
            .notify(token, Notification::authorization_complete(token))
            .await;
        advance(&mut entry, AuthorizationStatus::Notified);

        tracing::info!(
            correlation_token = %token,
            was_pending,
            replaced,
            notified_sessions,
            "Authorization complete"
        );

        Ok(CompletedAuthorization {
            token: token.clone(),
            notified_sessions,
            was_pending,
        })
    }

    /// Returns the live credential, refreshing it once if it has expired.
    ///
    /// `None` when nothing is installed, the credential expired without a
    /// refresh token, or the refresh failed.
    pub async fn usable_credential(&self) -> Option<Arc<Credential>> {
        self.usable_credential_at(Timestamp::now()).await
    }

    pub(crate) async fn usable_credential_at(&self, now: Timestamp) -> Option<Arc<Credential>> {
        let current = self.reader.current().await?;
        if !current.is_expired_at(now, EXPIRY_SKEW_SECS) {
            return Some(current);
        }
        if !current.can_refresh() {
            tracing::debug!("Credential expired without refresh token");
            return None;
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited
        let current = self.reader.current().await?;
        if !current.is_expired_at(now, EXPIRY_SKEW_SECS) {
            return Some(current);
        }

        match self.server.refresh(&current).await {
            Ok(refreshed) => {
                self.writer.install(refreshed).await;
                tracing::info!("Credential refreshed");
                self.reader.current().await
            }
            Err(err) => {
                tracing::warn!(error = %err, "Credential refresh failed");
                None
            }
        }
    }

    /// Drops pending authorizations older than the TTL and releases their
    /// channel bindings. Returns how many were dropped.
    pub async fn evict_expired(&self) -> usize {
        self.evict_expired_at(Timestamp::now()).await
    }

    pub(crate) async fn evict_expired_at(&self, now: Timestamp) -> usize {
        let mut pending = self.pending.lock().await;
        let expired = pending.evict_expired(now);
        for token in &expired {
            self.channel.release(token).await;
        }
        drop(pending);

        if !expired.is_empty() {
            tracing::debug!(count = expired.len(), "Evicted expired authorizations");
        }
        expired.len()
    }

    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub async fn pending_status(&self, token: &CorrelationToken) -> Option<AuthorizationStatus> {
        self.pending.lock().await.get(token).map(|e| e.status())
    }

    /// Reader over the credential this manager installs.
    pub fn credentials(&self) -> CredentialReader {
        self.reader.clone()
    }
}

fn advance(entry: &mut Option<PendingAuthorization>, next: AuthorizationStatus) {
    if let Some(entry) = entry {
        if let Err(err) = entry.advance(next) {
            tracing::warn!(correlation_token = %entry.token(), error = %err, "Invalid authorization transition");
        }
    }
}
