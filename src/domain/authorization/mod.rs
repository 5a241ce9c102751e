//! Authorization domain - credentials and the deferred OAuth2 flow state.
//!
//! ## Key Types
//!
//! - [`CorrelationToken`] - Links a handed-out URL to its provider callback
//! - [`Credential`] - Access/refresh token pair with expiry
//! - [`CredentialStore`] - Single-writer, multi-reader credential cell
//! - [`PendingAuthorizations`] - Outstanding requests, bounded by TTL and count
//! - [`AuthorizationStatus`] - Lifecycle of one request

mod correlation;
mod credential;
mod credential_store;
mod pending;
mod status;

pub use correlation::CorrelationToken;
pub use credential::Credential;
pub use credential_store::{CredentialReader, CredentialStore, CredentialWriter};
pub use pending::{PendingAuthorization, PendingAuthorizations};
pub use status::AuthorizationStatus;
