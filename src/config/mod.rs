//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DUKE` prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use duke::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod conversation;
mod database;
mod error;
mod server;

pub use ai::{AiConfig, AiProvider};
pub use conversation::ConversationConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development setup (in-memory store, local Ollama).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (optional PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Mediator text-generation backend
    #[serde(default)]
    pub ai: AiConfig,

    /// Conversation windows and invite codes
    #[serde(default)]
    pub conversation: ConversationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DUKE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DUKE__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `DUKE__DATABASE__URL=...` -> `database.url = ...`
    /// - `DUKE__AI__PROVIDER=mock` -> `ai.provider = mock`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::Environment::default().prefix("DUKE").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Checks each section, then that a generator call fits inside one
    /// HTTP request.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.ai.validate()?;
        self.conversation.validate()?;

        // A mediator call cut off by the request timeout fails the post
        // after the turn was already recorded
        if self.ai.provider == AiProvider::Ollama
            && self.ai.timeout_secs >= self.server.request_timeout_secs
        {
            return Err(ValidationError::AiTimeoutExceedsRequestTimeout {
                ai_secs: self.ai.timeout_secs,
                request_secs: self.server.request_timeout_secs,
            });
        }
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

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "DUKE__SERVER__PORT",
        "DUKE__SERVER__ENVIRONMENT",
        "DUKE__DATABASE__URL",
        "DUKE__AI__PROVIDER",
        "DUKE__AI__API_KEY",
        "DUKE__CONVERSATION__CONTEXT_WINDOW",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ai.model, "duke");
        assert_eq!(config.conversation.context_window, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("DUKE__SERVER__PORT", "9001");
        env::set_var("DUKE__SERVER__ENVIRONMENT", "production");
        env::set_var("DUKE__DATABASE__URL", "postgresql://test@localhost/duke");
        env::set_var("DUKE__AI__PROVIDER", "mock");
        env::set_var("DUKE__AI__API_KEY", "token-123");
        env::set_var("DUKE__CONVERSATION__CONTEXT_WINDOW", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 9001);
        assert!(config.is_production());
        assert_eq!(config.database.url(), Some("postgresql://test@localhost/duke"));
        assert_eq!(config.ai.provider, AiProvider::Mock);
        assert_eq!(
            config.ai.api_key.as_ref().map(|k| k.expose_secret().as_str()),
            Some("token-123")
        );
        assert_eq!(config.conversation.context_window, 5);
    }

    #[test]
    fn test_validate_reports_first_invalid_section() {
        let mut config = AppConfig::default();
        config.database.url = Some("mysql://localhost".to_string());
        assert_eq!(config.validate(), Err(ValidationError::InvalidDatabaseUrl));
    }

    #[test]
    fn test_ai_timeout_must_fit_in_request_timeout() {
        let mut config = AppConfig::default();
        config.ai.timeout_secs = 600;
        assert_eq!(
            config.validate(),
            Err(ValidationError::AiTimeoutExceedsRequestTimeout {
                ai_secs: 600,
                request_secs: 180,
            })
        );

        config.ai.timeout_secs = 180;
        assert!(config.validate().is_err());

        config.server.request_timeout_secs = 600;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mock_provider_skips_timeout_ordering() {
        let mut config = AppConfig::default();
        config.ai.provider = AiProvider::Mock;
        config.ai.timeout_secs = 600;
        assert!(config.validate().is_ok());
    }
}
