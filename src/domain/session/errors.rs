//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, SessionStatus, ValidationError};

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session was not found.
    NotFound(SessionId),
    /// No session uses this invite code.
    InviteCodeNotFound(String),
    /// Operation is not allowed in the session's current status.
    InvalidState {
        operation: String,
        status: SessionStatus,
    },
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Sender is not the participant whose turn it is.
    TurnViolation { expected: String, sender: String },
    /// Text generation failed or produced nothing usable.
    MediationFailed(String),
    /// Identifier or invite code collision that could not be resolved.
    Conflict(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }
    pub fn invite_code_not_found(code: impl Into<String>) -> Self {
        SessionError::InviteCodeNotFound(code.into())
    }
    pub fn invalid_state(operation: impl Into<String>, status: SessionStatus) -> Self {
        SessionError::InvalidState {
            operation: operation.into(),
            status,
        }
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn turn_violation(expected: impl Into<String>, sender: impl Into<String>) -> Self {
        SessionError::TurnViolation {
            expected: expected.into(),
            sender: sender.into(),
        }
    }
    pub fn mediation_failed(message: impl Into<String>) -> Self {
        SessionError::MediationFailed(message.into())
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        SessionError::Conflict(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::InviteCodeNotFound(_) => ErrorCode::SessionNotFound,
            SessionError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SessionError::TurnViolation { .. } => ErrorCode::TurnViolation,
            SessionError::MediationFailed(_) => ErrorCode::MediationFailed,
            SessionError::Conflict(_) => ErrorCode::Conflict,
            SessionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::InviteCodeNotFound(code) => {
                format!("No session found for invite code: {}", code)
            }
            SessionError::InvalidState { operation, status } => {
                format!("Cannot {} a session that is {}", operation, status.as_str())
            }
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SessionError::TurnViolation { expected, sender } => {
                format!("It is not {}'s turn; waiting for {}", sender, expected)
            }
            SessionError::MediationFailed(msg) => format!("Mediation failed: {}", msg),
            SessionError::Conflict(msg) => format!("Conflict: {}", msg),
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => SessionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::Conflict => SessionError::Conflict(err.message),
            ErrorCode::MediationFailed => SessionError::MediationFailed(err.message),
            _ => SessionError::Infrastructure(err.to_string()),
        }
    }
}
