//! Document-backed repositories.
//!
//! Translate Session and Message aggregates to and from JSON documents held
//! in any `DocumentStore`. Field names in the stored documents are the
//! serde names of the aggregates.

mod message_repository;
mod session_repository;

pub use message_repository::DocumentMessageRepository;
pub use session_repository::DocumentSessionRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Document, StoreError};

fn to_document<T: Serialize>(value: &T) -> Result<Document, DomainError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DomainError::new(
            ErrorCode::InternalError,
            format!("Expected an object, serialized {}", other),
        )),
        Err(e) => Err(DomainError::new(
            ErrorCode::InternalError,
            format!("Failed to serialize document: {}", e),
        )),
    }
}

fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, DomainError> {
    serde_json::from_value(Value::Object(document)).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Stored document is malformed: {}", e),
        )
    })
}

fn store_error(operation: &str, err: StoreError) -> DomainError {
    let code = match &err {
        StoreError::Duplicate { .. } => ErrorCode::Conflict,
        // Only sessions are ever updated in place
        StoreError::NotMatched { .. } => ErrorCode::SessionNotFound,
        StoreError::Serialization(_) | StoreError::Unavailable(_) => ErrorCode::DatabaseError,
    };
    DomainError::new(code, format!("Failed to {}: {}", operation, err))
}
