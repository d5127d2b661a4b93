//! Text Generator Port - Interface for the mediator's language model.
//!
//! The mediator only needs "prompt in, text out". Backends (Ollama, a mock
//! for tests) implement this port and are chosen when the service is wired
//! up.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl TextGenerator for Echo {
//!     async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
//!         Ok(prompt.to_string())
//!     }
//!
//!     fn info(&self) -> GeneratorInfo {
//!         GeneratorInfo::new("echo", "none")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::Serialize;

/// Port for text generation.
///
/// Calls may be slow; implementations must not hold locks shared across
/// sessions while waiting on the backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Backend name and model, for logging.
    fn info(&self) -> GeneratorInfo;
}

/// Generator identification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorInfo {
    /// Backend name (e.g., "ollama", "mock").
    pub name: String,
    /// Model identifier (e.g., "duke").
    pub model: String,
}

impl GeneratorInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Text generation errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Backend answered with an error status.
    #[error("backend rejected request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error details from the backend.
        message: String,
    },

    /// Backend is unavailable.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Failed to parse backend response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl GenerationError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
