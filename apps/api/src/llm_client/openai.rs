//! Chat-completion backend (OpenAI).
//!
//! Credential probe: `GET /models`. Generation: `POST /chat/completions` with a
//! system + user message pair.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::{
    ensure_success, LlmError, ProviderBackend, ProviderCredential, MAX_OUTPUT_TOKENS, TEMPERATURE,
};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl ChatResponse {
    fn into_text(self) -> Option<String> {
        self.choices.into_iter().next().and_then(|c| c.message.content)
    }
}

#[derive(Clone)]
pub struct OpenAiBackend {
    client: Client,
    base_url: String,
}

impl OpenAiBackend {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ProviderBackend for OpenAiBackend {
    async fn check_credential(&self, credential: &ProviderCredential) -> Result<(), LlmError> {
        let response = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(credential.api_key.expose_secret())
            .send()
            .await?;

        ensure_success(response).await?;
        Ok(())
    }

    async fn complete(
        &self,
        credential: &ProviderCredential,
        system: &str,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &credential.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(credential.api_key.expose_secret())
            .json(&request_body)
            .send()
            .await?;

        let body = ensure_success(response).await?.text().await?;
        let chat: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat.usage {
            tracing::debug!(
                "OpenAI usage: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        chat.into_text().ok_or(LlmError::EmptyContent)
    }
}
