//! Application wiring: builds the store, the generator and the handlers from
//! configuration, and assembles the HTTP service.

use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::adapters::ai::{MockTextGenerator, OllamaConfig, OllamaGenerator};
use crate::adapters::http::{api_router, SessionAppState};
use crate::adapters::postgres::PostgresDocumentStore;
use crate::adapters::repository::{DocumentMessageRepository, DocumentSessionRepository};
use crate::adapters::storage::InMemoryDocumentStore;
use crate::application::{
    CreateSessionHandler, GetSessionStatusHandler, JoinSessionHandler, MediationService,
    PostMessageHandler, SessionLocks,
};
use crate::config::{AiConfig, AiProvider, ConversationConfig, DatabaseConfig, ServerConfig};
use crate::ports::{DocumentStore, GenerationError, StoreError, TextGenerator};

/// Connects the configured document store; in-memory when no URL is set.
pub async fn connect_store(config: &DatabaseConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match config.url() {
        Some(url) => {
            let store =
                PostgresDocumentStore::connect(url, config.max_connections, config.acquire_timeout())
                    .await?;
            tracing::info!(max_connections = config.max_connections, "Connected to PostgreSQL");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("No database URL configured, sessions are kept in memory");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
    }
}

/// Builds the configured text generator.
pub fn build_generator(config: &AiConfig) -> Result<Arc<dyn TextGenerator>, GenerationError> {
    let generator: Arc<dyn TextGenerator> = match config.provider {
        AiProvider::Ollama => {
            let mut ollama = OllamaConfig::new(&config.base_url)
                .with_model(&config.model)
                .with_timeout(config.timeout());
            if let Some(key) = &config.api_key {
                ollama = ollama.with_api_key(key.clone());
            }
            Arc::new(OllamaGenerator::new(ollama)?)
        }
        AiProvider::Mock => Arc::new(MockTextGenerator::new()),
    };

    let info = generator.info();
    tracing::info!(backend = %info.name, model = %info.model, "Text generator ready");
    Ok(generator)
}

/// Builds every handler over one store and generator.
pub fn build_session_state(
    store: Arc<dyn DocumentStore>,
    generator: Arc<dyn TextGenerator>,
    config: &ConversationConfig,
) -> SessionAppState {
    let sessions = Arc::new(DocumentSessionRepository::new(Arc::clone(&store)));
    let messages = Arc::new(DocumentMessageRepository::new(store));
    let locks = SessionLocks::new();

    let mediation = Arc::new(
        MediationService::new(messages.clone(), generator)
            .with_context_window(config.context_window)
            .with_trigger_lookback(config.trigger_lookback),
    );

    SessionAppState::new(
        Arc::new(
            CreateSessionHandler::new(sessions.clone())
                .with_invite_codes(config.invite_code_length, config.invite_code_attempts),
        ),
        Arc::new(JoinSessionHandler::new(sessions.clone(), locks.clone())),
        Arc::new(PostMessageHandler::new(sessions.clone(), mediation, locks)),
        Arc::new(
            GetSessionStatusHandler::new(sessions, messages).with_window(config.status_window),
        ),
    )
}

/// The API router wrapped in tracing, CORS and timeout layers.
pub fn build_router(
    sessions: SessionAppState,
    store: Arc<dyn DocumentStore>,
    server: &ServerConfig,
) -> Router {
    api_router(sessions, store)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match server.allowed_origins() {
        Ok(origins) if origins.is_empty() => layer.allow_origin(Any),
        Ok(origins) => layer.allow_origin(AllowOrigin::list(origins)),
        Err(e) => {
            // Unvalidated config: allow no cross-origin callers
            tracing::warn!(error = %e, "Invalid CORS origins, cross-origin requests disabled");
            layer
        }
    }
}
