//! JoinSessionHandler - Command handler for the invited partner joining.

use std::sync::Arc;

use crate::application::SessionLocks;
use crate::domain::session::{InviteCode, Session, SessionError};
use crate::ports::SessionRepository;

/// Command to join a session by invite code.
#[derive(Debug, Clone)]
pub struct JoinSessionCommand {
    pub invite_code: String,
    pub participant_name: String,
}

/// Result of a successful join.
#[derive(Debug, Clone)]
pub struct JoinSessionResult {
    pub session: Session,
}

/// Handler for joining sessions.
pub struct JoinSessionHandler {
    repository: Arc<dyn SessionRepository>,
    locks: SessionLocks,
}

impl JoinSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>, locks: SessionLocks) -> Self {
        Self { repository, locks }
    }

    pub async fn handle(&self, cmd: JoinSessionCommand) -> Result<JoinSessionResult, SessionError> {
        // 1. Resolve the code; malformed codes cannot match any session
        let code = InviteCode::parse(&cmd.invite_code)
            .map_err(|_| SessionError::invite_code_not_found(cmd.invite_code.trim()))?;

        let found = self
            .repository
            .find_by_invite_code(&code)
            .await?
            .ok_or_else(|| SessionError::invite_code_not_found(code.as_str()))?;

        // 2. Re-read under the session lock so two joins cannot both succeed
        let session_id = *found.id();
        let _guard = self.locks.lock(session_id).await;

        let mut session = self
            .repository
            .find_by_id(&session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(session_id))?;

        // 3. Apply and persist
        session.join(&cmd.participant_name)?;
        self.repository.update(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            participant = %cmd.participant_name,
            "Participant joined session"
        );

        Ok(JoinSessionResult { session })
    }
}
