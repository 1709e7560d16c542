pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::portfolio::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/catalog", get(handlers::handle_catalog))
        .route(
            "/api/v1/prompt/preview",
            post(handlers::handle_prompt_preview),
        )
        // Sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/credentials/validate",
            post(handlers::handle_validate_credential),
        )
        .route(
            "/api/v1/sessions/:id/generate",
            post(handlers::handle_generate),
        )
        .route(
            "/api/v1/sessions/:id/artifact",
            get(handlers::handle_download_artifact).delete(handlers::handle_clear_artifact),
        )
        .with_state(state)
}
