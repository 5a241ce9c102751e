//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `CalendarService` - Remote calendar API
//! - `AuthorizationServer` - OAuth2 consent URL, code exchange and refresh
//! - `NotificationChannel` - Pushes to sessions waiting on a correlation token

mod authorization_server;
mod calendar_service;
mod notification_channel;

pub use authorization_server::{AuthorizationError, AuthorizationServer};
pub use calendar_service::{CalendarError, CalendarService};
pub use notification_channel::{Notification, NotificationChannel};
