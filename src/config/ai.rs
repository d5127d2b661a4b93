//! Mediator text-generation configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Text-generation backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Backend used for mediator turns
    #[serde(default)]
    pub provider: AiProvider,

    /// Ollama server root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token, for servers behind an authenticating proxy
    pub api_key: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Text-generation backend
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Ollama,
    /// Canned replies; for local runs without a model server
    Mock,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidAiTimeout);
        }
        if self.provider == AiProvider::Ollama {
            if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
                return Err(ValidationError::InvalidAiBaseUrl(self.base_url.clone()));
            }
            if self.model.trim().is_empty() {
                return Err(ValidationError::MissingRequired("AI_MODEL"));
            }
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "duke".to_string()
}

fn default_timeout() -> u64 {
    120
}
