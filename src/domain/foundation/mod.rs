//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the state machine trait and error
//! types that the rest of the domain builds on.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{InvocationId, SessionId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
