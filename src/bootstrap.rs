//! Service assembly.
//!
//! Wires the ports to their adapters and the application services to each
//! other. `assemble` takes the two remote ports as arguments so tests can
//! run the full stack against the in-memory mocks.

use std::sync::Arc;

use thiserror::Error;

use crate::adapters::event_stream::{McpProtocol, SessionHub};
use crate::adapters::google::{GoogleCalendarClient, GoogleClientError, GoogleOAuthClient};
use crate::adapters::http::{app_router, AppState};
use crate::application::{
    AuthorizationFlowConfig, AuthorizationFlowManager, CalendarProxy, ToolDispatcher,
};
use crate::config::{AppConfig, ConfigError, ValidationError as ConfigValidationError};
use crate::domain::authorization::CredentialStore;
use crate::domain::tools::{calendar_registry, ToolRegistryError};
use crate::ports::{AuthorizationServer, CalendarService};

/// Failures while starting the server.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    #[error("failed to build tool registry: {0}")]
    Registry(#[from] ToolRegistryError),

    #[error("failed to build Google client: {0}")]
    GoogleClient(#[from] GoogleClientError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fully wired application services.
#[derive(Clone)]
pub struct Services {
    pub hub: Arc<SessionHub>,
    pub authorization: Arc<AuthorizationFlowManager>,
    pub dispatcher: Arc<ToolDispatcher>,
    pub protocol: Arc<McpProtocol>,
}

impl Services {
    /// Builds the HTTP router over these services.
    pub fn router(&self, config: &AppConfig) -> axum::Router {
        app_router(
            AppState {
                hub: Arc::clone(&self.hub),
                protocol: Arc::clone(&self.protocol),
                dispatcher: Arc::clone(&self.dispatcher),
                authorization: Arc::clone(&self.authorization),
                keep_alive: config.transport.keep_alive(),
            },
            &config.server,
        )
    }
}

/// Wires services around the given authorization server and calendar.
pub fn assemble(
    config: &AppConfig,
    authorization_server: Arc<dyn AuthorizationServer>,
    calendar: Arc<dyn CalendarService>,
) -> Result<Services, BootstrapError> {
    let registry = Arc::new(calendar_registry()?);
    let hub = Arc::new(SessionHub::new(&config.transport));
    let (writer, reader) = CredentialStore::new().split();

    let authorization = Arc::new(AuthorizationFlowManager::new(
        authorization_server,
        hub.clone(),
        writer,
        AuthorizationFlowConfig::from(&config.oauth),
    ));
    let dispatcher = Arc::new(ToolDispatcher::new(
        registry,
        authorization.clone(),
        CalendarProxy::new(calendar, reader),
    ));
    let protocol = Arc::new(McpProtocol::new(dispatcher.clone()));

    tracing::info!(
        tools = dispatcher.registry().tool_count(),
        pending_ttl_secs = config.oauth.pending_ttl_secs,
        max_pending = config.oauth.max_pending,
        "Services assembled"
    );

    Ok(Services {
        hub,
        authorization,
        dispatcher,
        protocol,
    })
}

/// Wires services against the real Google endpoints.
pub fn assemble_google(config: &AppConfig) -> Result<Services, BootstrapError> {
    let oauth = Arc::new(GoogleOAuthClient::new(&config.oauth)?);
    let calendar = Arc::new(GoogleCalendarClient::new(&config.calendar)?);
    assemble(config, oauth, calendar)
}
