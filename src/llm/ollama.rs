//! Ollama backend implementation
//!
//! Talks to the native Ollama HTTP API: `GET /api/tags` for the installed
//! model listing and `POST /api/chat` for non-streaming completions.

use crate::config::FallbackConfig;
use crate::error::{LlmError, LlmResult};
use crate::llm::backend::{ChatBackend, ModelCatalog};
use crate::llm::messages::{ChatMessage, ChatResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    model: String,
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

/// HTTP client for the Ollama inference server
pub struct OllamaBackend {
    config: FallbackConfig,
    http_client: Client,
}

impl OllamaBackend {
    /// Create a new Ollama backend from configuration
    pub fn new(config: FallbackConfig) -> LlmResult<Self> {
        config.validate()?;
        let http_client = Client::builder()
            .build()
            .map_err(|e| LlmError::backend(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Base URL of the backing Ollama server
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Query `GET /api/tags` for the installed model names
    #[instrument(skip(self), level = "debug")]
    async fn fetch_installed_models(&self) -> LlmResult<Vec<String>> {
        let url = format!("{}/api/tags", self.config.base_url);

        let response = self
            .http_client
            .get(&url)
            .timeout(self.config.probe_timeout)
            .send()
            .await
            .map_err(|e| LlmError::backend(format!("Ollama tags request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(LlmError::backend(format!(
                "Ollama tags request returned status {}",
                status
            )));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::backend(format!("Failed to parse Ollama tags response: {}", e)))?;

        let names: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();
        tracing::debug!(count = names.len(), "fetched installed models");
        Ok(names)
    }

    /// Run a non-streaming chat completion via `POST /api/chat`
    #[instrument(skip(self, messages), level = "debug", fields(model = %model))]
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> LlmResult<ChatResponse> {
        let url = format!("{}/api/chat", self.config.base_url);

        let request_body = json!({
            "model": model,
            "messages": messages,
            "stream": false,
        });

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .timeout(self.config.request_timeout)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::chat(model, format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::chat(
                model,
                format!("status {}: {}", status, error_text),
            ));
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| LlmError::chat(model, format!("failed to parse response: {}", e)))?;

        Ok(ChatResponse {
            model: reply.model,
            content: reply.message.content,
        })
    }
}

#[async_trait]
impl ModelCatalog for OllamaBackend {
    async fn installed_models(&self) -> LlmResult<Vec<String>> {
        self.fetch_installed_models().await
    }
}

#[async_trait]
impl ChatBackend for OllamaBackend {
    async fn chat(&self, model: &str, messages: &[ChatMessage]) -> LlmResult<ChatResponse> {
        self.chat_completion(model, messages).await
    }
}
