//! Message repository over a document store.

use async_trait::async_trait;
use std::sync::Arc;

use super::{from_document, store_error, to_document};
use crate::domain::conversation::Message;
use crate::domain::foundation::{DomainError, SessionId};
use crate::ports::{Collection, DocumentStore, Filter, FindOptions, MessageRepository};

/// Stores messages in the `messages` collection.
#[derive(Clone)]
pub struct DocumentMessageRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentMessageRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MessageRepository for DocumentMessageRepository {
    async fn append(&self, message: &Message) -> Result<(), DomainError> {
        let document = to_document(message)?;
        self.store
            .insert(Collection::MESSAGES, document)
            .await
            .map_err(|e| store_error("insert message", e))
    }

    async fn recent(
        &self,
        session_id: &SessionId,
        limit: usize,
    ) -> Result<Vec<Message>, DomainError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let documents = self
            .store
            .find(
                Collection::MESSAGES,
                &Filter::new().eq("session_id", session_id.to_string()),
                &FindOptions::newest_first("timestamp").with_limit(limit),
            )
            .await
            .map_err(|e| store_error("fetch messages", e))?;

        documents.into_iter().map(from_document).collect()
    }
}
