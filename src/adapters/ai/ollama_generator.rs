//! Ollama Generator - Implementation of TextGenerator for an Ollama server.
//!
//! Sends non-streaming requests to `{base_url}/api/generate` and returns the
//! `response` field of the reply.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OllamaConfig::new("http://localhost:11434")
//!     .with_model("duke")
//!     .with_timeout(Duration::from_secs(120));
//!
//! let generator = OllamaGenerator::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{GenerationError, GeneratorInfo, TextGenerator};

/// Configuration for the Ollama generator.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Server root, without a trailing slash (e.g. "http://localhost:11434").
    pub base_url: String,
    /// Model name (default: "duke").
    pub model: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Bearer token for servers behind an authenticating proxy.
    api_key: Option<Secret<String>>,
}

impl OllamaConfig {
    /// Creates a configuration for the given server.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: "duke".to_string(),
            timeout: Duration::from_secs(120),
            api_key: None,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a bearer token sent with every request.
    pub fn with_api_key(mut self, api_key: Secret<String>) -> Self {
        self.api_key = Some(api_key);
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}

/// Ollama text generator.
pub struct OllamaGenerator {
    config: OllamaConfig,
    client: Client,
}

impl OllamaGenerator {
    /// Creates a generator with the given configuration.
    ///
    /// # Errors
    ///
    /// - `Unavailable` if the HTTP client cannot be built
    pub fn new(config: OllamaConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.config.base_url)
    }

    async fn send_request(&self, prompt: &str) -> Result<Response, GenerationError> {
        let body = OllamaRequest {
            model: &self.config.model,
            prompt,
            stream: false,
        };

        let mut request = self.client.post(self.generate_url()).json(&body);
        if let Some(key) = self.config.api_key() {
            request = request.bearer_auth(key);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                GenerationError::network(format!("Connection failed: {}", e))
            } else {
                GenerationError::network(e.to_string())
            }
        })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, GenerationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        let message = error_message(&error_body);

        match status.as_u16() {
            502..=504 => Err(GenerationError::unavailable(format!(
                "Server error {}: {}",
                status, message
            ))),
            code => Err(GenerationError::rejected(code, message)),
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self.send_request(prompt).await?;
        let response = self.handle_response_status(response).await?;

        let parsed: OllamaResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else {
                GenerationError::parse(format!("Failed to parse response: {}", e))
            }
        })?;

        Ok(parsed.response)
    }

    fn info(&self) -> GeneratorInfo {
        GeneratorInfo::new("ollama", self.config.model.clone())
    }
}

/// Ollama reports failures as `{"error": "..."}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<OllamaErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorBody {
    error: String,
}
