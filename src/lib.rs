//! FoodSave LLM coordination layer
//!
//! This crate picks a usable inference model for the FoodSave assistant from
//! a ranked preference list, tracking locally-reported failures and probing
//! candidates against the Ollama server's installed-model listing. It also
//! ships a fallback-aware chat client that walks the preference chain when
//! generations fail.
//!
//! The coordinator is an explicit instance: construct it once at application
//! startup and pass it by handle to whatever needs model selection.
//!
//! ```no_run
//! use std::sync::Arc;
//! use foodsave_llm::{FallbackConfig, ModelFallbackCoordinator, OllamaBackend};
//!
//! # async fn example() -> foodsave_llm::LlmResult<()> {
//! let mut config = FallbackConfig::default();
//! config.apply_env()?;
//!
//! let backend = Arc::new(OllamaBackend::new(config.clone())?);
//! let coordinator = ModelFallbackCoordinator::new(backend, &config)?;
//!
//! let model = coordinator.get_working_model(None).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod llm;

pub use config::FallbackConfig;
pub use error::{LlmError, LlmResult};
pub use llm::{
    ChatBackend, ChatMessage, ChatResponse, FallbackChatClient, MessageRole, ModelCatalog,
    ModelFallbackCoordinator, OllamaBackend,
};
