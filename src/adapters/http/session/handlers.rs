//! HTTP handlers for session endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    CreateSessionCommand, CreateSessionHandler, GetSessionStatusHandler, GetSessionStatusQuery,
    JoinSessionCommand, JoinSessionHandler, PostMessageCommand, PostMessageHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;

use super::dto::{
    CreateSessionRequest, CreateSessionResponse, ErrorResponse, JoinSessionRequest,
    JoinSessionResponse, PostMessageRequest, PostMessageResponse, SessionStatusResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionAppState {
    create_handler: Arc<CreateSessionHandler>,
    join_handler: Arc<JoinSessionHandler>,
    post_handler: Arc<PostMessageHandler>,
    status_handler: Arc<GetSessionStatusHandler>,
}

impl SessionAppState {
    pub fn new(
        create_handler: Arc<CreateSessionHandler>,
        join_handler: Arc<JoinSessionHandler>,
        post_handler: Arc<PostMessageHandler>,
        status_handler: Arc<GetSessionStatusHandler>,
    ) -> Self {
        Self {
            create_handler,
            join_handler,
            post_handler,
            status_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Create a new session
pub async fn create_session(
    State(state): State<SessionAppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, SessionApiError> {
    let cmd = CreateSessionCommand {
        creator_name: req.creator_name,
        partner_name: req.partner_name,
    };

    let result = state.create_handler.handle(cmd).await?;
    let response = CreateSessionResponse {
        session_id: result.session.id().to_string(),
        invite_code: result.session.invite_code().to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/sessions/join - Join with an invite code
pub async fn join_session(
    State(state): State<SessionAppState>,
    Json(req): Json<JoinSessionRequest>,
) -> Result<impl IntoResponse, SessionApiError> {
    let cmd = JoinSessionCommand {
        invite_code: req.invite_code,
        participant_name: req.participant_name,
    };

    let result = state.join_handler.handle(cmd).await?;
    let response = JoinSessionResponse {
        session_id: result.session.id().to_string(),
        status: result.session.status().as_str().to_string(),
    };
    Ok(Json(response))
}

/// POST /api/sessions/:id/messages - Post a message on your turn
pub async fn post_message(
    State(state): State<SessionAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<PostMessageRequest>,
) -> Result<impl IntoResponse, SessionApiError> {
    let cmd = PostMessageCommand {
        session_id: parse_session_id(&session_id)?,
        sender_name: req.sender_name,
        content: req.content,
    };

    let result = state.post_handler.handle(cmd).await?;
    Ok(Json(PostMessageResponse::from(result)))
}

/// GET /api/sessions/:id - Session status and recent messages
pub async fn get_session_status(
    State(state): State<SessionAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, SessionApiError> {
    let query = GetSessionStatusQuery {
        session_id: parse_session_id(&session_id)?,
    };

    let view = state.status_handler.handle(query).await?;
    Ok(Json(SessionStatusResponse::from(view)))
}

fn parse_session_id(raw: &str) -> Result<SessionId, SessionApiError> {
    raw.parse::<SessionId>()
        .map_err(|_| SessionError::validation("session_id", "Invalid session ID").into())
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// API error type that converts session errors to HTTP responses.
#[derive(Debug)]
pub struct SessionApiError(SessionError);

impl From<SessionError> for SessionApiError {
    fn from(err: SessionError) -> Self {
        Self(err)
    }
}

impl SessionApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            SessionError::NotFound(_) | SessionError::InviteCodeNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            SessionError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            SessionError::TurnViolation { .. } => StatusCode::FORBIDDEN,
            SessionError::InvalidState { .. } => StatusCode::CONFLICT,
            SessionError::MediationFailed(_) => StatusCode::BAD_GATEWAY,
            SessionError::Conflict(_) => StatusCode::SERVICE_UNAVAILABLE,
            SessionError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SessionApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, status = status.as_u16(), "Request failed");
        }

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}
