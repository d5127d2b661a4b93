//! Mediator context - the inputs a prompt template works from.
//!
//! Whatever backend renders the prompt, it receives the same three inputs:
//! the recent messages in chronological order, who spoke last, and what
//! they said.

use crate::domain::conversation::{ConversationWindow, Message};
use crate::domain::foundation::SessionId;

/// Default number of recent messages handed to the mediator.
pub const DEFAULT_CONTEXT_WINDOW: usize = 3;

/// Inputs for one mediator turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediationContext {
    /// Session being mediated.
    pub session_id: SessionId,
    /// Participant whose message triggered mediation.
    pub current_speaker: String,
    /// Literal content of that message.
    pub current_message: String,
    /// Most recent messages, oldest first.
    pub recent_messages: ConversationWindow,
}

impl MediationContext {
    /// Renders the recent messages as `sender: content` lines.
    pub fn transcript(&self) -> String {
        self.recent_messages
            .messages()
            .iter()
            .map(|m| format!("{}: {}", m.sender_name(), m.content()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Assembles a [`MediationContext`] from stored history.
#[derive(Debug, Clone, Copy)]
pub struct MediationContextBuilder {
    window_size: usize,
}

impl MediationContextBuilder {
    pub fn new(window_size: usize) -> Self {
        Self { window_size }
    }

    /// Number of messages fetched for the context.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Builds the context for mediating `trigger`.
    ///
    /// `recent_newest_first` is the session history as returned by the
    /// store, newest first; it normally already contains `trigger`.
    pub fn build(&self, trigger: &Message, recent_newest_first: Vec<Message>) -> MediationContext {
        MediationContext {
            session_id: *trigger.session_id(),
            current_speaker: trigger.sender_name().to_string(),
            current_message: trigger.content().to_string(),
            recent_messages: ConversationWindow::from_newest_first(
                recent_newest_first,
                self.window_size,
            ),
        }
    }
}

impl Default for MediationContextBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_WINDOW)
    }
}
