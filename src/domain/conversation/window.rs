//! Conversation windows - bounded, chronologically ordered views of a
//! session's most recent messages.
//!
//! Windows are derived on read and never persisted. The status display and
//! the mediator context each size their window independently.

use super::Message;

/// The most recent `capacity` messages of a session, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationWindow {
    messages: Vec<Message>,
}

impl ConversationWindow {
    /// Builds a window from messages ordered newest first, as returned by a
    /// time-ordered store query.
    ///
    /// Keeps at most `capacity` of the newest entries.
    pub fn from_newest_first(mut newest_first: Vec<Message>, capacity: usize) -> Self {
        newest_first.truncate(capacity);
        newest_first.reverse();
        Self {
            messages: newest_first,
        }
    }

    /// Messages oldest to newest.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages newest to oldest.
    pub fn newest_first(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().rev()
    }

    pub fn latest(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}
