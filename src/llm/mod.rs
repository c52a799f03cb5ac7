//! LLM backend integration and model selection

pub mod backend;
pub mod chat;
pub mod fallback;
pub mod messages;
pub mod ollama;

pub use backend::{ChatBackend, ModelCatalog};
pub use chat::FallbackChatClient;
pub use fallback::ModelFallbackCoordinator;
pub use messages::{ChatMessage, ChatResponse, MessageRole};
pub use ollama::OllamaBackend;
