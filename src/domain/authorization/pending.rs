//! Pending authorization requests, bounded by age and count.

use std::collections::HashMap;
use std::time::Duration;

use crate::domain::foundation::{SessionId, StateMachine, Timestamp, ValidationError};

use super::{AuthorizationStatus, CorrelationToken};

/// An authorization URL that has been handed out and not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAuthorization {
    token: CorrelationToken,
    authorization_url: String,
    status: AuthorizationStatus,
    requested_at: Timestamp,
    sessions: Vec<SessionId>,
}

impl PendingAuthorization {
    pub fn new(token: CorrelationToken, authorization_url: String, requested_at: Timestamp) -> Self {
        Self {
            token,
            authorization_url,
            status: AuthorizationStatus::Requested,
            requested_at,
            sessions: Vec::new(),
        }
    }

    pub fn token(&self) -> &CorrelationToken {
        &self.token
    }

    pub fn authorization_url(&self) -> &str {
        &self.authorization_url
    }

    pub fn status(&self) -> AuthorizationStatus {
        self.status
    }

    pub fn requested_at(&self) -> Timestamp {
        self.requested_at
    }

    /// Sessions that asked for this authorization, in request order.
    pub fn sessions(&self) -> &[SessionId] {
        &self.sessions
    }

    fn add_session(&mut self, session: SessionId) {
        if !self.sessions.contains(&session) {
            self.sessions.push(session);
        }
    }

    /// Advances the status, rejecting transitions the lifecycle forbids.
    pub fn advance(&mut self, next: AuthorizationStatus) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(next)?;
        Ok(())
    }

    fn is_expired_at(&self, now: Timestamp, ttl: Duration) -> bool {
        now.duration_since(&self.requested_at).num_seconds() >= ttl.as_secs() as i64
    }
}

/// Table of pending authorizations keyed by correlation token.
///
/// Entries older than `ttl` are evicted by [`evict_expired`]; when full,
/// recording a new token evicts the oldest entries first.
///
/// [`evict_expired`]: PendingAuthorizations::evict_expired
#[derive(Debug)]
pub struct PendingAuthorizations {
    entries: HashMap<CorrelationToken, PendingAuthorization>,
    ttl: Duration,
    capacity: usize,
}

impl PendingAuthorizations {
    /// Creates an empty table. A zero capacity is treated as one.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Records a request for `token`, or refreshes an existing one.
    ///
    /// Refreshing resets the entry to `Requested` with a new timestamp and
    /// URL, and keeps the sessions that already asked. Returns the tokens
    /// evicted to stay within capacity.
    pub fn record(
        &mut self,
        token: CorrelationToken,
        authorization_url: String,
        session: Option<SessionId>,
        now: Timestamp,
    ) -> Vec<CorrelationToken> {
        let mut evicted = Vec::new();
        let previous_sessions = match self.entries.remove(&token) {
            Some(previous) => previous.sessions,
            None => {
                while self.entries.len() >= self.capacity {
                    match self.oldest() {
                        Some(oldest) => {
                            self.entries.remove(&oldest);
                            evicted.push(oldest);
                        }
                        None => break,
                    }
                }
                Vec::new()
            }
        };

        let mut entry = PendingAuthorization::new(token.clone(), authorization_url, now);
        entry.sessions = previous_sessions;
        if let Some(session) = session {
            entry.add_session(session);
        }
        self.entries.insert(token, entry);
        evicted
    }

    /// Marks the entry for `token` as `CallbackReceived` without removing it.
    ///
    /// Returns false for unknown tokens and for entries that are not
    /// `Requested`, such as a failed or already claimed one. The entry stays
    /// in the table until [`complete_claimed`] or [`fail_claimed`], so a
    /// callback abandoned mid-exchange still ages out with the TTL.
    ///
    /// [`complete_claimed`]: PendingAuthorizations::complete_claimed
    /// [`fail_claimed`]: PendingAuthorizations::fail_claimed
    pub fn claim_for_callback(&mut self, token: &CorrelationToken) -> bool {
        match self.entries.get_mut(token) {
            Some(entry) => entry.advance(AuthorizationStatus::CallbackReceived).is_ok(),
            None => false,
        }
    }

    /// Removes a claimed entry after a successful exchange.
    ///
    /// A fresh request recorded while the exchange ran is left in place.
    pub fn complete_claimed(&mut self, token: &CorrelationToken) -> Option<PendingAuthorization> {
        match self.entries.get(token).map(|e| e.status) {
            Some(AuthorizationStatus::CallbackReceived) => self.entries.remove(token),
            _ => None,
        }
    }

    /// Marks a claimed entry `Failed`. It keeps its original timestamp so it
    /// ages out with the TTL; a fresh request recorded meanwhile is untouched.
    pub fn fail_claimed(&mut self, token: &CorrelationToken) {
        if let Some(entry) = self.entries.get_mut(token) {
            if entry.status == AuthorizationStatus::CallbackReceived {
                let _ = entry.advance(AuthorizationStatus::Failed);
            }
        }
    }

    /// Removes entries older than the TTL and returns their tokens.
    pub fn evict_expired(&mut self, now: Timestamp) -> Vec<CorrelationToken> {
        let ttl = self.ttl;
        let expired: Vec<CorrelationToken> = self
            .entries
            .values()
            .filter(|e| e.is_expired_at(now, ttl))
            .map(|e| e.token.clone())
            .collect();
        for token in &expired {
            self.entries.remove(token);
        }
        expired
    }

    pub fn get(&self, token: &CorrelationToken) -> Option<&PendingAuthorization> {
        self.entries.get(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn oldest(&self) -> Option<CorrelationToken> {
        self.entries
            .values()
            .min_by_key(|e| e.requested_at)
            .map(|e| e.token.clone())
    }
}
