//! Message repository port.
//!
//! Messages are append-only; the only read is "most recent N, newest first".

use crate::domain::conversation::Message;
use crate::domain::foundation::{DomainError, SessionId};
use async_trait::async_trait;

/// Repository port for session messages.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message to its session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn append(&self, message: &Message) -> Result<(), DomainError>;

    /// The session's most recent messages of any kind, newest first.
    async fn recent(&self, session_id: &SessionId, limit: usize)
        -> Result<Vec<Message>, DomainError>;
}
