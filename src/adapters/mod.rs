//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - In-memory document store
//! - `postgres` - PostgreSQL document store
//! - `repository` - Session and message repositories over any document store
//! - `ai` - Text generators (Ollama, mock)
//! - `http` - REST API

pub mod ai;
pub mod http;
pub mod postgres;
pub mod repository;
pub mod storage;

pub use ai::{MockTextGenerator, OllamaConfig, OllamaGenerator};
pub use postgres::PostgresDocumentStore;
pub use repository::{DocumentMessageRepository, DocumentSessionRepository};
pub use storage::InMemoryDocumentStore;
