//! In-Memory Document Store Adapter
//!
//! Keeps collections in process memory. Used when no database is
//! configured, and throughout the tests.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{
    Collection, Document, DocumentStore, Filter, FindOptions, StoreError, Write,
};

/// In-memory document storage with optional unique keys per collection.
#[derive(Debug, Clone)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<HashMap<&'static str, Vec<Document>>>>,
    unique_keys: HashMap<&'static str, Vec<&'static str>>,
}

impl InMemoryDocumentStore {
    /// Create a store with the unique keys the service relies on:
    /// session `id` and `invite_code`, message `id`.
    pub fn new() -> Self {
        Self::without_unique_keys()
            .with_unique_key(Collection::SESSIONS, "id")
            .with_unique_key(Collection::SESSIONS, "invite_code")
            .with_unique_key(Collection::MESSAGES, "id")
    }

    /// Create a store that accepts any insert.
    pub fn without_unique_keys() -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            unique_keys: HashMap::new(),
        }
    }

    /// Reject inserts whose `field` value already exists in `collection`.
    pub fn with_unique_key(mut self, collection: Collection, field: &'static str) -> Self {
        self.unique_keys
            .entry(collection.name())
            .or_default()
            .push(field);
        self
    }

    /// Number of documents in a collection (useful for tests).
    pub async fn count(&self, collection: Collection) -> usize {
        self.collections
            .read()
            .await
            .get(collection.name())
            .map_or(0, Vec::len)
    }

    /// Clear all stored data (useful for tests).
    pub async fn clear(&self) {
        self.collections.write().await.clear();
    }

    fn check_unique<'a>(
        &self,
        collection: Collection,
        mut existing: impl Iterator<Item = &'a Document>,
        document: &Document,
    ) -> Result<(), StoreError> {
        let Some(fields) = self.unique_keys.get(collection.name()) else {
            return Ok(());
        };
        let clash = existing.find_map(|other| {
            fields.iter().copied().find(|field| {
                matches!(document.get(*field), Some(value) if other.get(*field) == Some(value))
            })
        });
        match clash {
            Some(field) => {
                let value = document.get(field).cloned().unwrap_or(Value::Null);
                Err(StoreError::duplicate(
                    collection,
                    format!("{}={}", field, value),
                ))
            }
            None => Ok(()),
        }
    }
}

/// A validated write waiting to be applied.
enum Staged {
    Push(Collection, Document),
    Replace(Collection, usize, Document),
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sort_key(document: &Document, field: &str) -> Option<DateTime<FixedOffset>> {
    match document.get(field) {
        Some(Value::String(raw)) => DateTime::parse_from_rfc3339(raw).ok(),
        _ => None,
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn insert(&self, collection: Collection, document: Document) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.name()).or_default();
        self.check_unique(collection, documents.iter(), &document)?;
        documents.push(document);
        Ok(())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection.name())
            .and_then(|docs| docs.iter().find(|d| filter.matches(d)))
            .cloned())
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: &FindOptions,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection.name()) else {
            return Ok(Vec::new());
        };

        let mut matching: Vec<(usize, &Document)> = documents
            .iter()
            .enumerate()
            .filter(|(_, d)| filter.matches(d))
            .collect();

        if let Some(field) = &options.newest_first_by {
            matching.sort_by(|(ia, a), (ib, b)| {
                sort_key(b, field)
                    .cmp(&sort_key(a, field))
                    .then(ib.cmp(ia))
            });
        }

        let limit = options.limit.unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .take(limit)
            .map(|(_, d)| d.clone())
            .collect())
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        document: Document,
    ) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection.name()) else {
            return Ok(false);
        };
        match documents.iter_mut().find(|d| filter.matches(d)) {
            Some(slot) => {
                *slot = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn commit(&self, writes: Vec<Write>) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;

        // Validate the whole batch before touching anything
        let mut staged: Vec<Staged> = Vec::with_capacity(writes.len());
        for write in writes {
            match write {
                Write::Insert {
                    collection,
                    document,
                } => {
                    let existing = collections.get(collection.name()).into_iter().flatten();
                    let pending = staged.iter().filter_map(|s| match s {
                        Staged::Push(c, d) if *c == collection => Some(d),
                        _ => None,
                    });
                    self.check_unique(collection, existing.chain(pending), &document)?;
                    staged.push(Staged::Push(collection, document));
                }
                Write::UpdateOne {
                    collection,
                    filter,
                    document,
                } => {
                    let position = collections
                        .get(collection.name())
                        .and_then(|docs| docs.iter().position(|d| filter.matches(d)))
                        .ok_or_else(|| StoreError::not_matched(collection, &filter))?;
                    staged.push(Staged::Replace(collection, position, document));
                }
            }
        }

        // Pushes only append, so staged positions stay valid
        for write in staged {
            match write {
                Staged::Push(collection, document) => {
                    collections
                        .entry(collection.name())
                        .or_default()
                        .push(document);
                }
                Staged::Replace(collection, position, document) => {
                    if let Some(slot) = collections
                        .get_mut(collection.name())
                        .and_then(|docs| docs.get_mut(position))
                    {
                        *slot = document;
                    }
                }
            }
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
