//! HTTP adapters - REST API implementations.
//!
//! - `session` - Session lifecycle and messaging under `/api/sessions`
//! - `health` - Liveness and store connectivity

pub mod health;
pub mod session;

use std::sync::Arc;

use axum::Router;

use crate::ports::DocumentStore;

pub use health::health_routes;
pub use session::{session_routes, SessionAppState};

/// Assembles every route of the public API.
pub fn api_router(sessions: SessionAppState, store: Arc<dyn DocumentStore>) -> Router {
    Router::new()
        .nest("/api/sessions", session_routes(sessions))
        .merge(health_routes(store))
}
