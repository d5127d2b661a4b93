//! Conversation domain module.
//!
//! Messages exchanged within a session and the windows used to read them
//! back in order.

mod message;
mod window;

pub use message::{Message, MessageKind};
pub use window::ConversationWindow;
