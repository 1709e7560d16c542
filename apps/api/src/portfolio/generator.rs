//! Portfolio generation: orchestrates the full pipeline.
//!
//! Flow: validate → compile_prompt → ProviderAdapter::generate_text →
//!       sanitize_response.
//!
//! Single attempt. Either a complete sanitized document comes back or the
//! whole call fails; there is no partial result.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{GenerationError, ProviderAdapter, ProviderCredential};
use crate::portfolio::compiler::compile_prompt;
use crate::portfolio::models::PortfolioRequest;
use crate::portfolio::prompts::PORTFOLIO_SYSTEM;
use crate::portfolio::sanitize::{has_doctype, sanitize_response};

/// Runs the generation pipeline and returns the sanitized HTML.
///
/// Validation errors are raised before any network call is made.
pub async fn generate_portfolio(
    adapter: &ProviderAdapter,
    credential: &ProviderCredential,
    request: &PortfolioRequest,
) -> Result<String, AppError> {
    // Step 1: Reject incomplete requests before touching the network
    request.validate()?;

    // Step 2: Compile
    let prompt = compile_prompt(request);
    info!(
        provider = %credential.kind,
        model = %credential.model,
        projects = request.projects.len(),
        positions = request.experience.len(),
        degrees = request.education.len(),
        prompt_chars = prompt.len(),
        "Compiled portfolio prompt"
    );

    // Step 3: One provider call
    let raw = adapter
        .generate_text(credential, PORTFOLIO_SYSTEM, &prompt)
        .await?;

    // Step 4: Sanitize
    let html = sanitize_response(&raw);
    if html.is_empty() {
        return Err(GenerationError::new("provider returned no HTML content").into());
    }
    if !has_doctype(&html) {
        warn!(
            provider = %credential.kind,
            "Generated document does not start with a DOCTYPE declaration"
        );
    }

    info!(
        provider = %credential.kind,
        raw_chars = raw.len(),
        html_bytes = html.len(),
        "Portfolio generated"
    );

    Ok(html)
}
