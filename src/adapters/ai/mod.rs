//! Text generation adapters.
//!
//! - `OllamaGenerator` - HTTP client for an Ollama server
//! - `MockTextGenerator` - Scriptable generator for tests and offline runs

mod mock_generator;
mod ollama_generator;

pub use mock_generator::{MockError, MockResponse, MockTextGenerator, DEFAULT_MOCK_RESPONSE};
pub use ollama_generator::{OllamaConfig, OllamaGenerator};
