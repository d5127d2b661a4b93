//! Session command and query handlers.

mod create_session;
mod get_session_status;
mod join_session;
mod post_message;

pub use create_session::{
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult,
    DEFAULT_INVITE_CODE_ATTEMPTS, DEFAULT_INVITE_CODE_LENGTH,
};
pub use get_session_status::{
    GetSessionStatusHandler, GetSessionStatusQuery, SessionStatusView, DEFAULT_STATUS_WINDOW,
};
pub use join_session::{JoinSessionCommand, JoinSessionHandler, JoinSessionResult};
pub use post_message::{PostMessageCommand, PostMessageHandler, PostMessageResult};
