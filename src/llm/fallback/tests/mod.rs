//! Fallback coordinator tests


use crate::error::{LlmError, LlmResult};
use crate::llm::backend::ModelCatalog;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Catalog double returning a fixed installed-model list and counting probes
pub(super) struct StaticCatalog {
    installed: Vec<String>,
    probes: AtomicUsize,
    unreachable: bool,
}

impl StaticCatalog {
    pub(super) fn new(installed: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            installed: installed.iter().map(|m| m.to_string()).collect(),
            probes: AtomicUsize::new(0),
            unreachable: false,
        })
    }

    /// A catalog whose every query fails, as if the backend were down
    pub(super) fn down() -> Arc<Self> {
        Arc::new(Self {
            installed: Vec::new(),
            probes: AtomicUsize::new(0),
            unreachable: true,
        })
    }

    pub(super) fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelCatalog for StaticCatalog {
    async fn installed_models(&self) -> LlmResult<Vec<String>> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            return Err(LlmError::backend("connection refused"));
        }
        Ok(self.installed.clone())
    }
}
