//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `DocumentStore` - Schemaless collections of JSON documents
//! - `SessionRepository` - Session aggregate persistence
//! - `MessageRepository` - Append-only session messages
//!
//! ## Generation Ports
//!
//! - `TextGenerator` - Prompt-to-text capability used by the mediator

mod document_store;
mod message_repository;
mod session_repository;
mod text_generator;

pub use document_store::{
    Collection, Document, DocumentStore, Filter, FindOptions, StoreError, Write,
};
pub use message_repository::MessageRepository;
pub use session_repository::SessionRepository;
pub use text_generator::{GenerationError, GeneratorInfo, TextGenerator};
