//! GetSessionStatusHandler - Query handler for a session's current state.

use std::sync::Arc;

use crate::domain::conversation::Message;
use crate::domain::foundation::SessionId;
use crate::domain::session::{Session, SessionError};
use crate::ports::{MessageRepository, SessionRepository};

/// Default number of recent messages returned with the status.
pub const DEFAULT_STATUS_WINDOW: usize = 10;

/// Query for a session's status.
#[derive(Debug, Clone)]
pub struct GetSessionStatusQuery {
    pub session_id: SessionId,
}

/// Session state plus its most recent messages, newest first.
#[derive(Debug, Clone)]
pub struct SessionStatusView {
    pub session: Session,
    pub recent_messages: Vec<Message>,
}

/// Handler for status queries. Never modifies state.
pub struct GetSessionStatusHandler {
    sessions: Arc<dyn SessionRepository>,
    messages: Arc<dyn MessageRepository>,
    window: usize,
}

impl GetSessionStatusHandler {
    pub fn new(sessions: Arc<dyn SessionRepository>, messages: Arc<dyn MessageRepository>) -> Self {
        Self {
            sessions,
            messages,
            window: DEFAULT_STATUS_WINDOW,
        }
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub async fn handle(&self, query: GetSessionStatusQuery) -> Result<SessionStatusView, SessionError> {
        let session = self
            .sessions
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(query.session_id))?;

        let recent_messages = self.messages.recent(&query.session_id, self.window).await?;

        Ok(SessionStatusView {
            session,
            recent_messages,
        })
    }
}
