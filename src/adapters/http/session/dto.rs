//! Request and response bodies for session endpoints.

use serde::{Deserialize, Serialize};

use crate::application::{PostMessageResult, SessionStatusView};
use crate::domain::conversation::Message;

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub creator_name: String,
    pub partner_name: String,
}

/// POST /api/sessions/join
#[derive(Debug, Clone, Deserialize)]
pub struct JoinSessionRequest {
    pub invite_code: String,
    pub participant_name: String,
}

/// POST /api/sessions/:id/messages
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageRequest {
    pub sender_name: String,
    pub content: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub invite_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinSessionResponse {
    pub session_id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub sender_name: String,
    pub content: String,
    pub kind: String,
    pub timestamp: String,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id().to_string(),
            sender_name: message.sender_name().to_string(),
            content: message.content().to_string(),
            kind: message.kind().as_str().to_string(),
            timestamp: message.timestamp().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMessageResponse {
    pub message_id: String,
    pub next_turn: String,
    pub mediation_triggered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mediator_message: Option<MessageResponse>,
}

impl From<PostMessageResult> for PostMessageResponse {
    fn from(result: PostMessageResult) -> Self {
        Self {
            message_id: result.message.id().to_string(),
            next_turn: result.next_turn.to_string(),
            mediation_triggered: result.mediation_triggered(),
            mediator_message: result.mediator_message.as_ref().map(MessageResponse::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub status: String,
    pub current_turn: String,
    pub creator_name: String,
    pub partner_name: String,
    pub created_at: String,
    /// Newest first.
    pub recent_messages: Vec<MessageResponse>,
}

impl From<SessionStatusView> for SessionStatusResponse {
    fn from(view: SessionStatusView) -> Self {
        let session = view.session;
        Self {
            session_id: session.id().to_string(),
            status: session.status().as_str().to_string(),
            current_turn: session.current_turn().to_string(),
            creator_name: session.creator_name().to_string(),
            partner_name: session.partner_name().to_string(),
            created_at: session.created_at().to_rfc3339(),
            recent_messages: view.recent_messages.iter().map(MessageResponse::from).collect(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
