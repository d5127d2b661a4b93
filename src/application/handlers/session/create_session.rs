//! CreateSessionHandler - Command handler for creating new sessions.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, ParticipantName, SessionId};
use crate::domain::session::{InviteCode, Session, SessionError};
use crate::ports::SessionRepository;

/// Default invite code length.
pub const DEFAULT_INVITE_CODE_LENGTH: usize = 6;

/// Default number of invite codes tried before giving up.
pub const DEFAULT_INVITE_CODE_ATTEMPTS: usize = 5;

/// Command to create a new session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub creator_name: String,
    pub partner_name: String,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session: Session,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    repository: Arc<dyn SessionRepository>,
    invite_code_length: usize,
    max_attempts: usize,
}

impl CreateSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            invite_code_length: DEFAULT_INVITE_CODE_LENGTH,
            max_attempts: DEFAULT_INVITE_CODE_ATTEMPTS,
        }
    }

    pub fn with_invite_codes(mut self, length: usize, max_attempts: usize) -> Self {
        self.invite_code_length = length;
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub async fn handle(&self, cmd: CreateSessionCommand) -> Result<CreateSessionResult, SessionError> {
        // 1. Validate names
        let creator = ParticipantName::new("creator_name", &cmd.creator_name)?;
        let partner = ParticipantName::new("partner_name", &cmd.partner_name)?;

        // 2. Allocate a fresh invite code, regenerating on collision
        for attempt in 1..=self.max_attempts {
            let code = InviteCode::generate(self.invite_code_length);

            if self.repository.find_by_invite_code(&code).await?.is_some() {
                tracing::debug!(attempt, "Invite code already taken, regenerating");
                continue;
            }

            let session = Session::new(SessionId::new(), code, creator.clone(), partner.clone())?;

            // 3. Persist; a concurrent insert may still claim the code
            match self.repository.save(&session).await {
                Ok(()) => {
                    tracing::info!(
                        session_id = %session.id(),
                        invite_code = %session.invite_code(),
                        "Session created"
                    );
                    return Ok(CreateSessionResult { session });
                }
                Err(e) if e.code == ErrorCode::Conflict => {
                    tracing::debug!(attempt, error = %e, "Session insert collided, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::warn!(attempts = self.max_attempts, "Could not allocate a unique invite code");
        Err(SessionError::conflict(format!(
            "No unique invite code after {} attempts",
            self.max_attempts
        )))
    }
}
