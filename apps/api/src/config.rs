use anyhow::{Context, Result};

use crate::llm_client::{ProviderEndpoints, GEMINI_API_BASE, OPENAI_API_BASE};

/// Application configuration loaded from environment variables.
/// Provider API keys are NOT configured here; they arrive with each request.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub openai_api_base: String,
    pub gemini_api_base: String,
    /// Upper bound on one provider round-trip. Full portfolios can take minutes.
    pub provider_timeout_secs: u64,
    /// Sessions untouched for this long are dropped along with their artifact.
    pub session_ttl_secs: u64,
    pub session_sweep_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            openai_api_base: env_or("OPENAI_API_BASE", OPENAI_API_BASE),
            gemini_api_base: env_or("GEMINI_API_BASE", GEMINI_API_BASE),
            provider_timeout_secs: env_or("PROVIDER_TIMEOUT_SECS", "300")
                .parse::<u64>()
                .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?,
            session_ttl_secs: env_or("SESSION_TTL_SECS", "3600")
                .parse::<u64>()
                .context("SESSION_TTL_SECS must be a whole number of seconds")?,
            session_sweep_secs: env_or("SESSION_SWEEP_SECS", "60")
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .context("SESSION_SWEEP_SECS must be a positive number of seconds")?,
        })
    }

    pub fn provider_endpoints(&self) -> ProviderEndpoints {
        ProviderEndpoints {
            openai: self.openai_api_base.clone(),
            gemini: self.gemini_api_base.clone(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
