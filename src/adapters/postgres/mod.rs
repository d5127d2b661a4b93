//! PostgreSQL adapters - Database implementations for storage ports.
//!
//! - `PostgresDocumentStore` - JSONB-backed document collections

mod document_store;

pub use document_store::PostgresDocumentStore;
