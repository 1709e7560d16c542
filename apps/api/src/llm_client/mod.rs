/// LLM Client: the single point of entry for all provider calls in Folio.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// All LLM interactions MUST go through `ProviderAdapter`.
///
/// Each `ProviderKind` has exactly one `ProviderBackend`. The adapter collapses
/// every backend failure into one `GenerationError` so callers stay provider-agnostic.
use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod gemini;
pub mod openai;
pub mod prompts;

use gemini::GeminiBackend;
use openai::OpenAiBackend;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Sampling temperature shared by both backends.
pub const TEMPERATURE: f32 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 16_000;

// ────────────────────────────────────────────────────────────────────────────
// Provider identity + credentials
// ────────────────────────────────────────────────────────────────────────────

/// The closed set of supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Chat-completion style (message list in, choice out).
    #[serde(rename = "openai")]
    OpenAi,
    /// Prompt-completion style (contents + generation config in, candidates out).
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 2] = [ProviderKind::OpenAi, ProviderKind::Gemini];

    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI (GPT-4/3.5)",
            ProviderKind::Gemini => "Google Gemini",
        }
    }

    /// Models offered for selection. The provider remains the only authority
    /// on whether a model id is valid.
    pub fn models(self) -> &'static [&'static str] {
        match self {
            ProviderKind::OpenAi => &["gpt-4o", "gpt-4o-mini", "gpt-3.5-turbo"],
            ProviderKind::Gemini => &[
                "gemini-2.5-flash",
                "gemini-2.5-pro",
                "gemini-2.5-flash-lite",
            ],
        }
    }

    pub fn default_model(self) -> &'static str {
        self.models()[0]
    }
}

/// Model ids end up in provider URL paths, so only plain identifiers pass.
pub fn is_valid_model_id(model: &str) -> bool {
    !model.is_empty()
        && model
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAi => f.write_str("openai"),
            ProviderKind::Gemini => f.write_str("gemini"),
        }
    }
}

/// Per-request credentials. The key is held only for the duration of one call
/// and is redacted from `Debug` output.
#[derive(Debug)]
pub struct ProviderCredential {
    pub kind: ProviderKind,
    pub api_key: SecretString,
    pub model: String,
}

impl ProviderCredential {
    pub fn new(kind: ProviderKind, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            kind,
            api_key: SecretString::from(api_key.into()),
            model: model.into(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Transport-level failure inside a single backend.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Invalid model id: {0:?}")]
    InvalidModel(String),
}

/// The one error type callers see from `generate_text`, whatever backend failed.
#[derive(Debug, Error)]
#[error("Error generating portfolio: {message}")]
pub struct GenerationError {
    pub message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<LlmError> for GenerationError {
    fn from(err: LlmError) -> Self {
        Self::new(err.to_string())
    }
}

/// Result of a credential probe. A rejected key is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialCheck {
    pub valid: bool,
    pub message: String,
}

impl CredentialCheck {
    fn accepted() -> Self {
        Self {
            valid: true,
            message: "API key is valid".to_string(),
        }
    }

    fn rejected(err: &LlmError) -> Self {
        Self {
            valid: false,
            message: format!("API key validation failed: {err}"),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backend trait
// ────────────────────────────────────────────────────────────────────────────

/// One implementation per `ProviderKind`. Implementations isolate the vendor's
/// request shape and error body; they never retry.
#[async_trait]
pub trait ProviderBackend: Send + Sync {
    /// Performs exactly one lightweight call that succeeds only for a usable key.
    async fn check_credential(&self, credential: &ProviderCredential) -> Result<(), LlmError>;

    /// Performs exactly one generation call and returns the raw text payload.
    async fn complete(
        &self,
        credential: &ProviderCredential,
        system: &str,
        prompt: &str,
    ) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Adapter
// ────────────────────────────────────────────────────────────────────────────

/// Base URLs for each provider. Overridable so tests and proxies can point
/// the adapter elsewhere.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    pub openai: String,
    pub gemini: String,
}

/// Uniform front for every supported provider.
#[derive(Clone)]
pub struct ProviderAdapter {
    openai: OpenAiBackend,
    gemini: GeminiBackend,
}

impl ProviderAdapter {
    /// The client carries any timeout policy; the adapter itself defines none.
    pub fn new(client: Client, endpoints: ProviderEndpoints) -> Self {
        Self {
            openai: OpenAiBackend::new(client.clone(), endpoints.openai),
            gemini: GeminiBackend::new(client, endpoints.gemini),
        }
    }

    fn backend(&self, kind: ProviderKind) -> &dyn ProviderBackend {
        match kind {
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Gemini => &self.gemini,
        }
    }

    /// Probes the provider with one outbound call. Never mutates state and
    /// never fails: a bad key comes back as `valid == false` with the
    /// provider's own message.
    pub async fn validate_credential(&self, credential: &ProviderCredential) -> CredentialCheck {
        match self.backend(credential.kind).check_credential(credential).await {
            Ok(()) => {
                info!(
                    provider = %credential.kind,
                    model = %credential.model,
                    "Credential accepted"
                );
                CredentialCheck::accepted()
            }
            Err(e) => {
                warn!(
                    provider = %credential.kind,
                    model = %credential.model,
                    "Credential rejected: {e}"
                );
                CredentialCheck::rejected(&e)
            }
        }
    }

    /// Sends one generation request and returns the raw text. Every backend
    /// failure is reported as `GenerationError`.
    pub async fn generate_text(
        &self,
        credential: &ProviderCredential,
        system: &str,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        debug!(
            provider = %credential.kind,
            model = %credential.model,
            prompt_chars = prompt.len(),
            "Dispatching generation request"
        );

        let text = self
            .backend(credential.kind)
            .complete(credential, system, prompt)
            .await
            .map_err(|e| {
                warn!(provider = %credential.kind, "Generation call failed: {e}");
                GenerationError::from(e)
            })?;

        if text.trim().is_empty() {
            return Err(GenerationError::from(LlmError::EmptyContent));
        }

        debug!(
            provider = %credential.kind,
            response_chars = text.len(),
            "Generation call succeeded"
        );
        Ok(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared response handling
// ────────────────────────────────────────────────────────────────────────────

/// Both vendors wrap failures as `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
struct ProviderErrorEnvelope {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// Passes successful responses through; turns any non-2xx into `LlmError::Api`
/// carrying the vendor's message when the body has one.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(LlmError::Api {
        status: status.as_u16(),
        message: extract_error_message(&body),
    })
}

fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ProviderErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}
