//! Session repository port.
//!
//! Defines the contract for persisting and retrieving Session aggregates.

use crate::domain::conversation::Message;
use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::{InviteCode, Session};
use async_trait::async_trait;

/// Repository port for Session aggregate persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the id or invite code is already taken
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Update an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &Session) -> Result<(), DomainError>;

    /// Store an accepted user message together with the session state it
    /// produced. Either both are written or neither is.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn record_turn(&self, session: &Session, message: &Message) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Find a session by its invite code.
    ///
    /// Returns `None` if no session uses the code.
    async fn find_by_invite_code(&self, code: &InviteCode)
        -> Result<Option<Session>, DomainError>;
}
