use crate::llm_client::ProviderAdapter;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub providers: ProviderAdapter,
    pub sessions: SessionStore,
}
