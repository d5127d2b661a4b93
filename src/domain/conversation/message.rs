//! Message entity for sessions.
//!
//! Messages are immutable, append-only records owned by a session. They are
//! either written by a participant or inserted by the mediator.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    MessageId, ParticipantName, SessionId, Timestamp, ValidationError, MEDIATOR_NAME,
};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Written by one of the two participants.
    User,
    /// Generated by the AI mediator.
    Mediator,
}

impl MessageKind {
    /// Returns the snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::User => "user",
            MessageKind::Mediator => "mediator",
        }
    }
}

/// An immutable message within a session.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `content` is non-blank
/// - mediator messages carry `MEDIATOR_NAME` as sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message.
    id: MessageId,

    /// Session this message belongs to.
    session_id: SessionId,

    /// The text of the message.
    content: String,

    /// Participant name, or `MEDIATOR_NAME` for mediator messages.
    sender_name: String,

    /// Author kind.
    kind: MessageKind,

    /// When the message was stored.
    timestamp: Timestamp,
}

impl Message {
    /// Creates a participant-authored message.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if content is blank
    pub fn user(
        session_id: SessionId,
        sender: &ParticipantName,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(session_id, sender.as_str(), MessageKind::User, content)
    }

    /// Creates a mediator-authored message.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if content is blank
    pub fn mediator(
        session_id: SessionId,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(session_id, MEDIATOR_NAME, MessageKind::Mediator, content)
    }

    fn new(
        session_id: SessionId,
        sender_name: &str,
        kind: MessageKind,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }

        Ok(Self {
            id: MessageId::new(),
            session_id,
            content,
            sender_name: sender_name.to_string(),
            kind,
            timestamp: Timestamp::now(),
        })
    }

    /// Reconstitutes a message from persistence (no validation).
    pub fn reconstitute(
        id: MessageId,
        session_id: SessionId,
        content: String,
        sender_name: String,
        kind: MessageKind,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            session_id,
            content,
            sender_name,
            kind,
            timestamp,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn is_from_mediator(&self) -> bool {
        self.kind == MessageKind::Mediator
    }
}
