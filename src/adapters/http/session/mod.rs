//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateSessionRequest, CreateSessionResponse, ErrorResponse, JoinSessionRequest,
    JoinSessionResponse, MessageResponse, PostMessageRequest, PostMessageResponse,
    SessionStatusResponse,
};
pub use handlers::{SessionApiError, SessionAppState};
pub use routes::session_routes;
