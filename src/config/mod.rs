//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CALENDAR_MCP` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use calendar_mcp::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server listening on {}", config.server.bind_address());
//! ```

mod calendar;
mod error;
mod oauth;
mod server;
mod transport;

pub use calendar::CalendarConfig;
pub use error::{ConfigError, ValidationError};
pub use oauth::OAuthConfig;
pub use server::{Environment, ServerConfig};
pub use transport::TransportConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Google OAuth2 client configuration
    pub oauth: OAuthConfig,

    /// Google Calendar API configuration
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Event-stream transport tuning
    #[serde(default)]
    pub transport: TransportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CALENDAR_MCP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CALENDAR_MCP__SERVER__PORT=12345` -> `server.port = 12345`
    /// - `CALENDAR_MCP__OAUTH__CLIENT_ID=...` -> `oauth.client_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CALENDAR_MCP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.oauth.validate(&self.server.environment)?;
        self.calendar.validate()?;
        self.transport.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("CALENDAR_MCP__OAUTH__CLIENT_ID", "client-id.apps.googleusercontent.com");
        env::set_var("CALENDAR_MCP__OAUTH__CLIENT_SECRET", "shh");
        env::set_var(
            "CALENDAR_MCP__OAUTH__REDIRECT_URL",
            "http://localhost:12345/auth/callback",
        );
    }

    fn clear_env() {
        env::remove_var("CALENDAR_MCP__OAUTH__CLIENT_ID");
        env::remove_var("CALENDAR_MCP__OAUTH__CLIENT_SECRET");
        env::remove_var("CALENDAR_MCP__OAUTH__REDIRECT_URL");
        env::remove_var("CALENDAR_MCP__SERVER__PORT");
        env::remove_var("CALENDAR_MCP__SERVER__ENVIRONMENT");
        env::remove_var("CALENDAR_MCP__TRANSPORT__SESSION_BUFFER");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.oauth.client_id, "client-id.apps.googleusercontent.com");
        assert_eq!(config.oauth.client_secret.expose_secret(), "shh");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 12345);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.transport.session_buffer, 64);
        assert_eq!(config.oauth.max_pending, 256);
    }

    #[test]
    fn test_missing_oauth_section_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_err());
    }

    #[test]
    fn test_custom_values_override_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CALENDAR_MCP__SERVER__PORT", "5555");
        env::set_var("CALENDAR_MCP__SERVER__ENVIRONMENT", "production");
        env::set_var("CALENDAR_MCP__TRANSPORT__SESSION_BUFFER", "8");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 5555);
        assert!(config.is_production());
        assert_eq!(config.transport.session_buffer, 8);
    }
}
