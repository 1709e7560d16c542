mod config;
mod errors;
mod llm_client;
mod portfolio;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::ProviderAdapter;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // One HTTP client for every provider; the timeout is the only limit on a provider call
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.provider_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let providers = ProviderAdapter::new(http, config.provider_endpoints());
    info!(
        "Provider adapter initialized (openai: {}, gemini: {}, timeout: {}s)",
        config.openai_api_base, config.gemini_api_base, config.provider_timeout_secs
    );

    let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_secs));
    sessions.spawn_sweeper(Duration::from_secs(config.session_sweep_secs));
    info!(
        "Session store initialized (idle ttl: {}s, sweep every {}s)",
        config.session_ttl_secs, config.session_sweep_secs
    );

    let state = AppState {
        providers,
        sessions,
    };

    // TODO: restrict CORS to the form UI origin once it is deployed
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
