//! Backend collaborator traits
//!
//! These traits are the seam between the coordinator and the inference
//! backend. Production code uses [`crate::llm::ollama::OllamaBackend`];
//! tests substitute in-memory doubles.

use crate::error::LlmResult;
use crate::llm::messages::{ChatMessage, ChatResponse};
use async_trait::async_trait;

/// Queries the inference backend for the set of installed models
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// List the model names currently available on the backend.
    ///
    /// Transport and status failures surface as [`crate::error::LlmError::Backend`]
    /// here; the coordinator's health probe downgrades them to "unhealthy"
    /// rather than propagating them.
    async fn installed_models(&self) -> LlmResult<Vec<String>>;
}

/// A backend that can also run chat/generate requests
#[async_trait]
pub trait ChatBackend: ModelCatalog {
    /// Run a non-streaming chat completion against a specific model
    async fn chat(&self, model: &str, messages: &[ChatMessage]) -> LlmResult<ChatResponse>;
}
