//! Mock Text Generator for testing.
//!
//! Returns queued responses in order, falling back to a fixed reply once the
//! queue is empty. Records every prompt it receives.
//!
//! # Example
//!
//! ```ignore
//! let generator = MockTextGenerator::new()
//!     .with_response("I hear you both.")
//!     .with_error(MockError::Unavailable { message: "down".into() });
//!
//! assert_eq!(generator.generate("prompt").await?, "I hear you both.");
//! assert!(generator.generate("prompt").await.is_err());
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GenerationError, GeneratorInfo, TextGenerator};

/// Reply used when no response is queued.
pub const DEFAULT_MOCK_RESPONSE: &str = "Mock mediation";

/// Mock text generator for testing.
#[derive(Debug, Clone)]
pub struct MockTextGenerator {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: GeneratorInfo,
    delay: Duration,
    calls: Arc<Mutex<Vec<String>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    Rejected { status: u16, message: String },
    Unavailable { message: String },
    Network { message: String },
    Timeout { timeout_secs: u64 },
}

impl From<MockError> for GenerationError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::Rejected { status, message } => GenerationError::rejected(status, message),
            MockError::Unavailable { message } => GenerationError::unavailable(message),
            MockError::Network { message } => GenerationError::network(message),
            MockError::Timeout { timeout_secs } => GenerationError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: GeneratorInfo::new("mock", "mock-model"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success(content.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues a response on a generator that is already shared.
    pub fn push(&self, response: MockResponse) {
        lock(&self.responses).push_back(response);
    }

    /// Returns the number of calls made to this generator.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns every prompt received, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// Returns the most recent prompt.
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.calls).last().cloned()
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success(DEFAULT_MOCK_RESPONSE.to_string()))
    }
}

/// A poisoned mock only means another test thread panicked; keep going.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        lock(&self.calls).push(prompt.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success(content) => Ok(content),
            MockResponse::Error(err) => Err(err.into()),
        }
    }

    fn info(&self) -> GeneratorInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let generator = MockTextGenerator::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(generator.generate("a").await.unwrap(), "first");
        assert_eq!(generator.generate("b").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn falls_back_to_default_response() {
        let generator = MockTextGenerator::new();
        assert_eq!(generator.generate("a").await.unwrap(), DEFAULT_MOCK_RESPONSE);
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let generator = MockTextGenerator::new().with_error(MockError::Timeout { timeout_secs: 5 });
        let err = generator.generate("a").await.unwrap_err();
        assert!(matches!(err, GenerationError::Timeout { timeout_secs: 5 }));
    }

    #[tokio::test]
    async fn tracks_prompts() {
        let generator = MockTextGenerator::new();
        generator.generate("one").await.unwrap();
        generator.generate("two").await.unwrap();

        assert_eq!(generator.call_count(), 2);
        assert_eq!(generator.prompts(), vec!["one", "two"]);
        assert_eq!(generator.last_prompt().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn clones_share_queue_and_history() {
        let generator = MockTextGenerator::new();
        let shared = generator.clone();
        shared.push(MockResponse::Success("queued later".to_string()));

        assert_eq!(generator.generate("x").await.unwrap(), "queued later");
        assert_eq!(shared.call_count(), 1);
    }

    #[tokio::test]
    async fn delay_is_applied() {
        let generator = MockTextGenerator::new().with_delay(Duration::from_millis(20));
        let start = std::time::Instant::now();
        generator.generate("x").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn info_identifies_mock() {
        assert_eq!(MockTextGenerator::new().info().name, "mock");
    }
}
