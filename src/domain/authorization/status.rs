//! Authorization request lifecycle status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle of a pending authorization.
///
/// ```text
/// Requested -> CallbackReceived -> Exchanged -> Notified
///                    |
///                    +-> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    /// URL handed out, waiting for the provider redirect
    Requested,
    /// Redirect arrived, code exchange in progress
    CallbackReceived,
    /// Code exchanged and credential installed
    Exchanged,
    /// Waiting sessions have been told
    Notified,
    /// Code exchange failed
    Failed,
}

impl StateMachine for AuthorizationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AuthorizationStatus::*;
        matches!(
            (self, target),
            (Requested, CallbackReceived)
                | (CallbackReceived, Exchanged)
                | (CallbackReceived, Failed)
                | (Exchanged, Notified)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AuthorizationStatus::*;
        match self {
            Requested => vec![CallbackReceived],
            CallbackReceived => vec![Exchanged, Failed],
            Exchanged => vec![Notified],
            Notified | Failed => vec![],
        }
    }
}
