//! Auth HTTP adapter - OAuth2 redirect callback.

pub mod handlers;
pub mod routes;

pub use handlers::{AuthAppState, CallbackQuery};
pub use routes::auth_router;
