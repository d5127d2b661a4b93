//! Document Store Port - Interface for schemaless document persistence.
//!
//! Sessions and messages are stored as JSON documents grouped into named
//! collections. The store offers insert, point lookup, replacement and a
//! time-ordered range query; repositories translate between documents and
//! aggregates on top of it.
//!
//! # Design
//!
//! - Filters are top-level field equality only
//! - Range queries sort on an RFC 3339 timestamp field, newest first
//! - Unique-key violations surface as `StoreError::Duplicate` so callers can
//!   regenerate identifiers
//! - `commit` applies a batch of writes all-or-nothing

use async_trait::async_trait;
use serde_json::{Map, Value};

/// A stored JSON object.
pub type Document = Map<String, Value>;

/// Named group of documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Collection(&'static str);

impl Collection {
    pub const SESSIONS: Collection = Collection("sessions");
    pub const MESSAGES: Collection = Collection("messages");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field-equality filter. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Map<String, Value>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `field` to equal `value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.insert(field.into(), value.into());
        self
    }

    /// Returns true if every condition holds for `document`.
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }

    /// The conditions as a JSON object (usable for containment queries).
    pub fn as_json(&self) -> Value {
        Value::Object(self.conditions.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Sorting and paging for [`DocumentStore::find`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Timestamp field to sort on, newest first. Ties keep the most
    /// recently inserted document first.
    pub newest_first_by: Option<String>,
    /// Maximum number of documents to return.
    pub limit: Option<usize>,
}

impl FindOptions {
    /// Sorts by `field` descending.
    pub fn newest_first(field: impl Into<String>) -> Self {
        Self {
            newest_first_by: Some(field.into()),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One write in a [`DocumentStore::commit`] batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    /// Insert a new document.
    Insert {
        collection: Collection,
        document: Document,
    },
    /// Replace the first document matching `filter`; the batch fails if
    /// none does.
    UpdateOne {
        collection: Collection,
        filter: Filter,
        document: Document,
    },
}

/// Document store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique key already exists.
    #[error("duplicate key in {collection}: {key}")]
    Duplicate {
        collection: &'static str,
        key: String,
    },

    /// A batched update matched no document.
    #[error("no document in {collection} matches {filter}")]
    NotMatched {
        collection: &'static str,
        filter: String,
    },

    /// Document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Backend unreachable or failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn duplicate(collection: Collection, key: impl Into<String>) -> Self {
        Self::Duplicate {
            collection: collection.name(),
            key: key.into(),
        }
    }

    pub fn not_matched(collection: Collection, filter: &Filter) -> Self {
        Self::NotMatched {
            collection: collection.name(),
            filter: filter.as_json().to_string(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Port for document persistence.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document.
    ///
    /// # Errors
    ///
    /// - `Duplicate` if a document with the same unique key exists
    async fn insert(&self, collection: Collection, document: Document) -> Result<(), StoreError>;

    /// Return the first document matching `filter`.
    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Return every document matching `filter`, sorted and limited per `options`.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError>;

    /// Replace the first document matching `filter`.
    ///
    /// Returns false if nothing matched.
    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        document: Document,
    ) -> Result<bool, StoreError>;

    /// Apply every write in order, or none of them.
    ///
    /// # Errors
    ///
    /// - `Duplicate` if an insert violates a unique key
    /// - `NotMatched` if an update finds no document
    ///
    /// On any error the store is left as it was.
    async fn commit(&self, writes: Vec<Write>) -> Result<(), StoreError>;

    /// Check the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
