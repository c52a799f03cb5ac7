//! Error types for the FoodSave LLM coordination layer.
//!
//! Transport and backend failures are carried as [`LlmError::Backend`] up to
//! the health-probe boundary, where they are deliberately absorbed into a
//! boolean "unhealthy" signal. The only error a model-selection caller ever
//! sees is [`LlmError::ModelUnavailable`].

use thiserror::Error;

/// Result type alias for LLM coordination operations
pub type LlmResult<T> = Result<T, LlmError>;

/// Main error type for the LLM coordination layer
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport, status, or parse failures talking to the inference backend
    #[error("Backend error: {message}")]
    Backend { message: String },

    /// No candidate model is currently usable
    #[error("No usable model: {message}")]
    ModelUnavailable { message: String },

    /// A generation request against a specific model failed
    #[error("Chat error ({model}): {message}")]
    Chat { model: String, message: String },
}

impl LlmError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Create a model-unavailable error
    pub fn model_unavailable(message: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            message: message.into(),
        }
    }

    /// Create a chat error for a specific model
    pub fn chat(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Chat {
            model: model.into(),
            message: message.into(),
        }
    }

    /// Check whether this is the terminal "nothing works" condition.
    ///
    /// Callers use this to distinguish a service-unavailable style response
    /// from other error kinds.
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, Self::ModelUnavailable { .. })
    }
}
