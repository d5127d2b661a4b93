//! Liveness and store connectivity endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use crate::ports::DocumentStore;

/// GET / - The service is up.
pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Duke API is running" }))
}

/// GET /api/health/db - The document store answers a ping.
pub async fn database_health(State(store): State<Arc<dyn DocumentStore>>) -> impl IntoResponse {
    match store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "message": "Database connection successful" })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "error", "message": e.to_string() })),
            )
        }
    }
}

/// Creates the health router.
pub fn health_routes(store: Arc<dyn DocumentStore>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health/db", get(database_health))
        .with_state(store)
}
