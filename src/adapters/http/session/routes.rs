//! HTTP routes for session endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_session, get_session_status, join_session, post_message, SessionAppState,
};

/// Creates the session router, to be nested under `/api/sessions`.
///
/// # Routes
/// - `POST /` - Create a session
/// - `POST /join` - Join with an invite code
/// - `GET /:id` - Session status and recent messages
/// - `POST /:id/messages` - Post a message
pub fn session_routes(state: SessionAppState) -> Router {
    Router::new()
        .route("/", post(create_session))
        .route("/join", post(join_session))
        .route("/:id", get(get_session_status))
        .route("/:id/messages", post(post_message))
        .with_state(state)
}
