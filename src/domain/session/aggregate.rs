//! Session aggregate entity.
//!
//! A session is one mediated exchange between exactly two participants.
//! It owns the turn state machine: who may speak next, and whether the
//! session accepts joins or messages at all.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ParticipantName, SessionId, SessionStatus, StateMachine, Timestamp};

use super::{InviteCode, SessionError};

/// Session aggregate - turn-based exchange between two participants.
///
/// # Invariants
///
/// - `id` and `invite_code` are globally unique
/// - `creator_name` and `partner_name` differ
/// - `current_turn` is always one of the two participant names
/// - `status` only moves forward: Waiting -> Active -> Completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Token the partner uses to join.
    invite_code: InviteCode,

    /// Participant who created the session. Speaks first.
    creator_name: ParticipantName,

    /// Participant invited to join.
    partner_name: ParticipantName,

    /// Current lifecycle status.
    status: SessionStatus,

    /// Participant expected to send the next message.
    current_turn: ParticipantName,

    /// When the session was created.
    created_at: Timestamp,
}

impl Session {
    /// Create a new waiting session. The creator holds the first turn.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if both participants share the same name
    pub fn new(
        id: SessionId,
        invite_code: InviteCode,
        creator_name: ParticipantName,
        partner_name: ParticipantName,
    ) -> Result<Self, SessionError> {
        if creator_name == partner_name {
            return Err(SessionError::validation(
                "partner_name",
                "Partner name must differ from creator name",
            ));
        }

        Ok(Self {
            id,
            invite_code,
            current_turn: creator_name.clone(),
            creator_name,
            partner_name,
            status: SessionStatus::Waiting,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        invite_code: InviteCode,
        creator_name: ParticipantName,
        partner_name: ParticipantName,
        status: SessionStatus,
        current_turn: ParticipantName,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            invite_code,
            creator_name,
            partner_name,
            status,
            current_turn,
            created_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the invite code.
    pub fn invite_code(&self) -> &InviteCode {
        &self.invite_code
    }

    /// Returns the creator's name.
    pub fn creator_name(&self) -> &ParticipantName {
        &self.creator_name
    }

    /// Returns the partner's name.
    pub fn partner_name(&self) -> &ParticipantName {
        &self.partner_name
    }

    /// Returns the current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns the participant expected to speak next.
    pub fn current_turn(&self) -> &ParticipantName {
        &self.current_turn
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Participants
    // ─────────────────────────────────────────────────────────────────────────

    /// Looks up a participant by exact name.
    pub fn participant(&self, name: &str) -> Option<&ParticipantName> {
        [&self.creator_name, &self.partner_name]
            .into_iter()
            .find(|p| p.matches(name))
    }

    /// Checks if the name belongs to one of the two participants.
    pub fn is_participant(&self, name: &str) -> bool {
        self.participant(name).is_some()
    }

    /// Returns the participant who is not `name`.
    ///
    /// For a name that is neither participant this is the creator; callers
    /// check membership first.
    pub fn other_participant(&self, name: &str) -> &ParticipantName {
        if self.creator_name.matches(name) {
            &self.partner_name
        } else {
            &self.creator_name
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Join the session as one of the named participants.
    ///
    /// Activates the session. The turn is left with the creator.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is waiting
    /// - `ValidationFailed` if the name matches neither participant
    pub fn join(&mut self, participant_name: &str) -> Result<(), SessionError> {
        if !self.status.is_joinable() {
            return Err(SessionError::invalid_state("join", self.status));
        }
        if !self.is_participant(participant_name) {
            return Err(SessionError::validation(
                "participant_name",
                format!("'{}' is not a participant of this session", participant_name),
            ));
        }

        self.status = self
            .status
            .transition_to(SessionStatus::Active)
            .map_err(|_| SessionError::invalid_state("join", self.status))?;
        Ok(())
    }

    /// Record that `sender` spoke and hand the turn to the other participant.
    ///
    /// Returns the participant whose turn it now is.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is active
    /// - `TurnViolation` if `sender` is not the current speaker
    pub fn take_turn(&mut self, sender: &str) -> Result<ParticipantName, SessionError> {
        if !self.status.accepts_messages() {
            return Err(SessionError::invalid_state("post a message to", self.status));
        }
        if !self.current_turn.matches(sender) {
            return Err(SessionError::turn_violation(
                self.current_turn.as_str(),
                sender,
            ));
        }

        let next = self.other_participant(sender).clone();
        self.current_turn = next.clone();
        Ok(next)
    }
}
