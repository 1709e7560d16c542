//! Axum route handlers for the Portfolio API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{is_valid_model_id, ProviderCredential, ProviderKind};
use crate::portfolio::compiler::compile_prompt;
use crate::portfolio::generator::generate_portfolio;
use crate::portfolio::models::{PortfolioForm, PortfolioRequest};
use crate::portfolio::prompts::PORTFOLIO_SYSTEM;
use crate::portfolio::themes::{
    FontPair, Theme, ANIMATIONS, DEFAULT_ANIMATIONS, FONT_PAIRS, LAYOUT_STYLES, THEMES,
};
use crate::session::{ArtifactSummary, GeneratedArtifact, SessionSummary, ValidationRecord};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Credentials as sent by the client. `model` defaults to the provider's first model.
#[derive(Deserialize)]
pub struct CredentialPayload {
    pub provider: ProviderKind,
    pub api_key: String,
    pub model: Option<String>,
}

impl CredentialPayload {
    fn into_credential(self) -> Result<ProviderCredential, AppError> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Validation("api_key cannot be empty".to_string()));
        }

        let model = self
            .model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.provider.default_model().to_string());

        if !is_valid_model_id(&model) {
            return Err(AppError::Validation(format!(
                "model must contain only letters, digits, '.', '_' or '-' (got {model:?})"
            )));
        }

        Ok(ProviderCredential::new(
            self.provider,
            self.api_key.trim(),
            model,
        ))
    }
}

#[derive(Deserialize)]
pub struct GenerateBody {
    pub credential: CredentialPayload,
    #[serde(default)]
    pub form: PortfolioForm,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub session_id: Uuid,
    pub artifact: ArtifactSummary,
}

#[derive(Debug, Serialize)]
pub struct PromptPreviewResponse {
    pub system: &'static str,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ProviderCatalogEntry {
    pub kind: ProviderKind,
    pub name: &'static str,
    pub models: &'static [&'static str],
    pub default_model: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub themes: &'static [Theme],
    pub font_pairs: &'static [FontPair],
    pub layouts: &'static [&'static str],
    pub animations: &'static [&'static str],
    pub default_animations: &'static [&'static str],
    pub providers: Vec<ProviderCatalogEntry>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/catalog
///
/// Everything a client needs to render the design and provider pickers.
pub async fn handle_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        themes: THEMES,
        font_pairs: FONT_PAIRS,
        layouts: LAYOUT_STYLES,
        animations: ANIMATIONS,
        default_animations: DEFAULT_ANIMATIONS,
        providers: ProviderKind::ALL
            .into_iter()
            .map(|kind| ProviderCatalogEntry {
                kind,
                name: kind.display_name(),
                models: kind.models(),
                default_model: kind.default_model(),
            })
            .collect(),
    })
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionSummary>) {
    let summary = state.sessions.create();
    info!("Created session {}", summary.session_id);
    (StatusCode::CREATED, Json(summary))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSummary>, AppError> {
    Ok(Json(state.sessions.summary(session_id)?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(session_id)?;
    info!("Removed session {session_id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/credentials/validate
///
/// Probes the provider with one cheap call. A rejected key is reported in the
/// body with 200, never as an error status.
pub async fn handle_validate_credential(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<CredentialPayload>,
) -> Result<Json<ValidationRecord>, AppError> {
    // Fail fast on unknown sessions before spending a provider call
    state.sessions.summary(session_id)?;

    let credential = payload.into_credential()?;
    let check = state.providers.validate_credential(&credential).await;

    let record =
        state
            .sessions
            .record_validation(session_id, credential.kind, &credential.model, &check)?;
    Ok(Json(record))
}

/// POST /api/v1/sessions/:id/generate
///
/// Full pipeline: validate → compile → provider call → sanitize → store.
/// A failed attempt leaves the session's previous artifact in place.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, AppError> {
    let credential = body.credential.into_credential()?;
    let request = PortfolioRequest::from(body.form);

    let _in_flight = state.sessions.begin_generation(session_id)?;

    let html = generate_portfolio(&state.providers, &credential, &request).await?;

    let artifact = GeneratedArtifact::new(html, credential.kind, credential.model.as_str());
    let summary = ArtifactSummary::from(&artifact);
    state.sessions.store_artifact(session_id, artifact)?;

    info!(
        "Stored {} byte portfolio for session {session_id}",
        summary.meta.size_bytes
    );

    Ok(Json(GenerateResponse {
        session_id,
        artifact: summary,
    }))
}

/// GET /api/v1/sessions/:id/artifact
///
/// Serves the current artifact as a `portfolio.html` download.
pub async fn handle_download_artifact(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let artifact = state
        .sessions
        .artifact(session_id)?
        .ok_or_else(|| AppError::NotFound("No portfolio has been generated yet".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"portfolio.html\"",
            ),
        ],
        artifact.html,
    ))
}

/// DELETE /api/v1/sessions/:id/artifact
pub async fn handle_clear_artifact(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.clear_artifact(session_id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(
            "No portfolio has been generated yet".to_string(),
        ))
    }
}

/// POST /api/v1/prompt/preview
///
/// Compiles the prompt exactly as generation would, without calling a provider.
pub async fn handle_prompt_preview(
    Json(form): Json<PortfolioForm>,
) -> Result<Json<PromptPreviewResponse>, AppError> {
    let request = PortfolioRequest::from(form);
    request.validate()?;

    Ok(Json(PromptPreviewResponse {
        system: PORTFOLIO_SYSTEM,
        prompt: compile_prompt(&request),
    }))
}
