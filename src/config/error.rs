//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid listen address: {0}")]
    InvalidSocketAddr(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool size must be between 1 and 100")]
    InvalidPoolSize,

    #[error("Invalid AI base URL: {0}")]
    InvalidAiBaseUrl(String),

    #[error("Invalid AI timeout")]
    InvalidAiTimeout,

    #[error("AI timeout ({ai_secs}s) must be shorter than the request timeout ({request_secs}s)")]
    AiTimeoutExceedsRequestTimeout { ai_secs: u64, request_secs: u64 },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
    },
}
