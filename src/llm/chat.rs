//! Fallback-aware chat client
//!
//! The coordinator performs a single selection pass and never retries; the
//! retry policy lives here. On a failed generation the model is reported as
//! failed and selection runs again, so the next attempt lands on the next
//! healthy candidate.

use crate::error::{LlmError, LlmResult};
use crate::llm::backend::ChatBackend;
use crate::llm::fallback::ModelFallbackCoordinator;
use crate::llm::messages::{ChatMessage, ChatResponse};
use std::sync::Arc;
use tracing::{info, warn};

/// Chat client that degrades through the model preference chain
pub struct FallbackChatClient {
    backend: Arc<dyn ChatBackend>,
    coordinator: Arc<ModelFallbackCoordinator>,
}

impl FallbackChatClient {
    /// Create a new fallback-aware chat client
    pub fn new(backend: Arc<dyn ChatBackend>, coordinator: Arc<ModelFallbackCoordinator>) -> Self {
        Self {
            backend,
            coordinator,
        }
    }

    /// Send a chat request, falling back through the preference chain.
    ///
    /// At most one attempt per configured model. When a generation fails the
    /// model is marked failed with the coordinator before re-selecting, so
    /// the loop cannot pick it again.
    ///
    /// # Errors
    ///
    /// The last generation error when every candidate was tried, or
    /// [`LlmError::ModelUnavailable`] straight from selection when nothing
    /// is left to try.
    pub async fn chat(&self, messages: &[ChatMessage]) -> LlmResult<ChatResponse> {
        let mut last_error = None;
        let attempts = self.coordinator.preference_list().len().max(1);

        for attempt in 0..attempts {
            let model = match self.coordinator.get_working_model(None).await {
                Ok(model) => model,
                Err(error) => return Err(last_error.unwrap_or(error)),
            };

            match self.backend.chat(&model, messages).await {
                Ok(response) => {
                    if attempt > 0 {
                        info!(model = %model, "chat succeeded after fallback");
                    }
                    return Ok(response);
                }
                Err(error) => {
                    warn!(model = %model, %error, "chat request failed, marking model as failed");
                    self.coordinator.report_failure(&model).await;
                    last_error = Some(error);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::model_unavailable("All candidate models exhausted")))
    }

    /// The coordinator backing this client
    pub fn coordinator(&self) -> &ModelFallbackCoordinator {
        &self.coordinator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackConfig;
    use crate::llm::backend::ModelCatalog;
    use async_trait::async_trait;
    use std::collections::HashSet;

    /// Backend double: every model is installed, but only some can generate
    struct ScriptedBackend {
        installed: Vec<String>,
        broken: HashSet<String>,
    }

    impl ScriptedBackend {
        fn new(installed: &[&str], broken: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                installed: installed.iter().map(|m| m.to_string()).collect(),
                broken: broken.iter().map(|m| m.to_string()).collect(),
            })
        }
    }

    #[async_trait]
    impl ModelCatalog for ScriptedBackend {
        async fn installed_models(&self) -> LlmResult<Vec<String>> {
            Ok(self.installed.clone())
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn chat(&self, model: &str, _messages: &[ChatMessage]) -> LlmResult<ChatResponse> {
            if self.broken.contains(model) {
                return Err(LlmError::chat(model, "model runner crashed"));
            }
            Ok(ChatResponse {
                model: model.to_string(),
                content: format!("odpowiedź od {}", model),
            })
        }
    }

    fn client(backend: Arc<ScriptedBackend>, models: &[&str]) -> FallbackChatClient {
        let config = FallbackConfig {
            models: models.iter().map(|m| m.to_string()).collect(),
            ..FallbackConfig::default()
        };
        let coordinator =
            Arc::new(ModelFallbackCoordinator::new(backend.clone(), &config).unwrap());
        FallbackChatClient::new(backend, coordinator)
    }

    #[tokio::test]
    async fn test_chat_uses_primary_model() {
        let backend = ScriptedBackend::new(&["bielik-4.5b", "bielik-11b"], &[]);
        let client = client(backend, &["bielik-4.5b", "bielik-11b"]);

        let response = client.chat(&[ChatMessage::user("cześć")]).await.unwrap();
        assert_eq!(response.model, "bielik-4.5b");
    }

    #[tokio::test]
    async fn test_chat_falls_back_on_generation_failure() {
        let backend = ScriptedBackend::new(&["bielik-4.5b", "bielik-11b"], &["bielik-4.5b"]);
        let client = client(backend, &["bielik-4.5b", "bielik-11b"]);

        let response = client.chat(&[ChatMessage::user("cześć")]).await.unwrap();
        assert_eq!(response.model, "bielik-11b");

        // The failed model was reported to the coordinator
        assert_eq!(
            client.coordinator().failed_models().await,
            vec!["bielik-4.5b"]
        );
    }

    #[tokio::test]
    async fn test_chat_surfaces_last_error_when_all_models_broken() {
        let backend = ScriptedBackend::new(
            &["bielik-4.5b", "bielik-11b"],
            &["bielik-4.5b", "bielik-11b"],
        );
        let client = client(backend, &["bielik-4.5b", "bielik-11b"]);

        let err = client.chat(&[ChatMessage::user("cześć")]).await.unwrap_err();
        assert!(matches!(err, LlmError::Chat { .. }));
    }

    #[tokio::test]
    async fn test_chat_fails_fast_when_nothing_selectable() {
        let backend = ScriptedBackend::new(&["bielik-4.5b"], &[]);
        let client = client(backend, &["bielik-4.5b"]);

        client.coordinator().report_failure("bielik-4.5b").await;

        let err = client.chat(&[ChatMessage::user("cześć")]).await.unwrap_err();
        assert!(err.is_model_unavailable());
    }
}
