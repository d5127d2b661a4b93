//! Session repository over a document store.

use async_trait::async_trait;
use std::sync::Arc;

use super::{from_document, store_error, to_document};
use crate::domain::conversation::Message;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::session::{InviteCode, Session};
use crate::ports::{Collection, DocumentStore, Filter, SessionRepository, Write};

/// Stores sessions in the `sessions` collection.
#[derive(Clone)]
pub struct DocumentSessionRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentSessionRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn find_by(&self, filter: Filter) -> Result<Option<Session>, DomainError> {
        let document = self
            .store
            .find_one(Collection::SESSIONS, &filter)
            .await
            .map_err(|e| store_error("fetch session", e))?;

        document.map(from_document).transpose()
    }
}

fn id_filter(id: &SessionId) -> Filter {
    Filter::new().eq("id", id.to_string())
}

#[async_trait]
impl SessionRepository for DocumentSessionRepository {
    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let document = to_document(session)?;
        self.store
            .insert(Collection::SESSIONS, document)
            .await
            .map_err(|e| store_error("insert session", e))
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let document = to_document(session)?;
        let replaced = self
            .store
            .update_one(Collection::SESSIONS, &id_filter(session.id()), document)
            .await
            .map_err(|e| store_error("update session", e))?;

        if !replaced {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            ));
        }
        Ok(())
    }

    async fn record_turn(&self, session: &Session, message: &Message) -> Result<(), DomainError> {
        let writes = vec![
            Write::Insert {
                collection: Collection::MESSAGES,
                document: to_document(message)?,
            },
            Write::UpdateOne {
                collection: Collection::SESSIONS,
                filter: id_filter(session.id()),
                document: to_document(session)?,
            },
        ];

        self.store
            .commit(writes)
            .await
            .map_err(|e| store_error("record turn", e))
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        self.find_by(id_filter(id)).await
    }

    async fn find_by_invite_code(
        &self,
        code: &InviteCode,
    ) -> Result<Option<Session>, DomainError> {
        self.find_by(Filter::new().eq("invite_code", code.as_str()))
            .await
    }
}
