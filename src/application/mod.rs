//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (create, join, post) mutate a session under its lock; the
//! status query only reads.

pub mod handlers;
mod mediation_service;
mod session_locks;

pub use handlers::{
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult, GetSessionStatusHandler,
    GetSessionStatusQuery, JoinSessionCommand, JoinSessionHandler, JoinSessionResult,
    PostMessageCommand, PostMessageHandler, PostMessageResult, SessionStatusView,
};
pub use mediation_service::{MediationService, DEFAULT_TRIGGER_LOOKBACK};
pub use session_locks::{SessionGuard, SessionLocks};
