//! Prompt-completion backend (Google Gemini).
//!
//! Both the credential probe and generation go through
//! `POST /models/{model}:generateContent`; the probe sends a fixed short prompt
//! with no generation config.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::prompts::CREDENTIAL_PROBE_PROMPT;
use super::{
    ensure_success, is_valid_model_id, LlmError, ProviderBackend, ProviderCredential,
    MAX_OUTPUT_TOKENS, TEMPERATURE,
};

const TOP_P: f32 = 0.95;
const TOP_K: u32 = 40;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Clone)]
pub struct GeminiBackend {
    client: Client,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn generate_content(
        &self,
        credential: &ProviderCredential,
        request: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, LlmError> {
        if !is_valid_model_id(&credential.model) {
            return Err(LlmError::InvalidModel(credential.model.clone()));
        }

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, credential.model
            ))
            .header("x-goog-api-key", credential.api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        let body = ensure_success(response).await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ProviderBackend for GeminiBackend {
    async fn check_credential(&self, credential: &ProviderCredential) -> Result<(), LlmError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: CREDENTIAL_PROBE_PROMPT,
                }],
            }],
            system_instruction: None,
            generation_config: None,
        };

        self.generate_content(credential, &request).await?;
        Ok(())
    }

    async fn complete(
        &self,
        credential: &ProviderCredential,
        system: &str,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: Some(SystemInstruction {
                parts: vec![Part { text: system }],
            }),
            generation_config: Some(GenerationConfig::default()),
        };

        let response = self.generate_content(credential, &request).await?;

        if let Some(usage) = &response.usage_metadata {
            tracing::debug!(
                "Gemini usage: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count,
                usage.candidates_token_count
            );
        }

        response.into_text().ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::ProviderKind;
    use httpmock::prelude::*;
    use serde_json::json;

    fn credential(key: &str) -> ProviderCredential {
        ProviderCredential::new(ProviderKind::Gemini, key, "gemini-2.5-flash")
    }

    #[tokio::test]
    async fn test_check_credential_sends_probe_prompt() {
        let server = MockServer::start_async().await;
        let probe = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-2.5-flash:generateContent")
                    .header("x-goog-api-key", "AIza-good")
                    .json_body(json!({
                        "contents": [{"role": "user", "parts": [{"text": "Hello"}]}]
                    }));
                then.status(200).json_body(json!({
                    "candidates": [{"content": {"role": "model", "parts": [{"text": "Hi!"}]}}]
                }));
            })
            .await;

        let backend = GeminiBackend::new(Client::new(), server.url("/v1beta"));
        backend.check_credential(&credential("AIza-good")).await.unwrap();
        probe.assert_async().await;
    }

    #[tokio::test]
    async fn test_model_id_cannot_escape_the_models_path() {
        let server = MockServer::start_async().await;
        let any_call = server
            .mock_async(|when, then| {
                when.any_request();
                then.status(200).json_body(json!({
                    "candidates": [{"content": {"parts": [{"text": "Hi!"}]}}]
                }));
            })
            .await;

        let backend = GeminiBackend::new(Client::new(), server.url("/v1beta"));
        let credential =
            ProviderCredential::new(ProviderKind::Gemini, "AIza-good", "../../other#");

        let err = backend.check_credential(&credential).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidModel(_)));
        let err = backend.complete(&credential, "system", "prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidModel(_)));
        any_call.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_check_credential_surfaces_provider_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-2.5-flash:generateContent");
                then.status(400).json_body(json!({
                    "error": {
                        "code": 400,
                        "message": "API key not valid. Please pass a valid API key.",
                        "status": "INVALID_ARGUMENT"
                    }
                }));
            })
            .await;

        let backend = GeminiBackend::new(Client::new(), server.url("/v1beta"));
        let err = backend.check_credential(&credential("bad")).await.unwrap_err();
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_complete_sends_generation_config_and_joins_parts() {
        let server = MockServer::start_async().await;
        let generate = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-2.5-flash:generateContent")
                    .json_body_partial(
                        r#"{"generationConfig": {"temperature": 0.7, "topP": 0.95, "topK": 40, "maxOutputTokens": 16000}}"#,
                    )
                    .body_contains("systemInstruction")
                    .body_contains("Build my site");
                then.status(200).json_body(json!({
                    "candidates": [{
                        "content": {"role": "model", "parts": [
                            {"text": "<!DOCTYPE html><html>"},
                            {"text": "</html>"}
                        ]},
                        "finishReason": "STOP"
                    }],
                    "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
                }));
            })
            .await;

        let backend = GeminiBackend::new(Client::new(), server.url("/v1beta"));
        let text = backend
            .complete(&credential("AIza-good"), "You build sites.", "Build my site")
            .await
            .unwrap();

        assert_eq!(text, "<!DOCTYPE html><html></html>");
        generate.assert_async().await;
    }

    #[tokio::test]
    async fn test_blocked_prompt_without_candidates_is_empty_content() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1beta/models/gemini-2.5-flash:generateContent");
                then.status(200)
                    .json_body(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
            })
            .await;

        let backend = GeminiBackend::new(Client::new(), server.url("/v1beta"));
        let err = backend.complete(&credential("k"), "s", "p").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }
}
