//! Model fallback coordinator

use crate::config::FallbackConfig;
use crate::error::{LlmError, LlmResult};
use crate::llm::backend::ModelCatalog;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Picks a usable model from a ranked preference list.
///
/// The coordinator keeps a volatile failure set: models that calling code
/// has reported as failed are skipped without probing until an explicit
/// [`report_recovered`](Self::report_recovered) call. The health probe
/// itself is a pure backend-availability check; it neither consults nor
/// mutates the failure set, and all transport errors degrade to "unhealthy"
/// rather than propagating.
///
/// One instance is constructed at application startup and shared by handle;
/// failure memory does not survive a restart.
pub struct ModelFallbackCoordinator {
    /// Backend listing of installed models
    catalog: Arc<dyn ModelCatalog>,
    /// Candidate models, most preferred first; fixed for this instance
    preference: Vec<String>,
    /// Models currently believed unavailable
    failed: RwLock<HashSet<String>>,
    /// When false, selection skips all probing
    fallback_enabled: bool,
}

impl ModelFallbackCoordinator {
    /// Create a coordinator from configuration and a backend catalog
    pub fn new(catalog: Arc<dyn ModelCatalog>, config: &FallbackConfig) -> LlmResult<Self> {
        if config.models.is_empty() {
            return Err(LlmError::config("No models configured for fallback"));
        }

        Ok(Self {
            catalog,
            preference: config.models.clone(),
            failed: RwLock::new(HashSet::new()),
            fallback_enabled: config.fallback_enabled,
        })
    }

    /// Return the first usable model, in preference order.
    ///
    /// With fallback disabled this returns `preferred` (or the first
    /// configured model) without issuing a single probe; callers opting
    /// out accept the risk of selecting an unhealthy model.
    ///
    /// With fallback enabled, candidates are scanned in a single pass:
    /// `preferred` first if given, then the configured preference list.
    /// Failure-set members are skipped without probing; the first candidate
    /// whose probe succeeds is returned immediately. There is no retry or
    /// backoff inside this call; re-invoking after a delay is the caller's
    /// policy.
    ///
    /// # Errors
    ///
    /// [`LlmError::ModelUnavailable`] when every candidate is either in the
    /// failure set or fails its probe.
    pub async fn get_working_model(&self, preferred: Option<&str>) -> LlmResult<String> {
        if !self.fallback_enabled {
            if let Some(model) = preferred {
                return Ok(model.to_string());
            }
            return self
                .preference
                .first()
                .cloned()
                .ok_or_else(|| LlmError::model_unavailable("No models configured"));
        }

        let failed = self.failed.read().await.clone();

        let mut candidates: Vec<&str> = Vec::with_capacity(self.preference.len() + 1);
        if let Some(model) = preferred {
            candidates.push(model);
        }
        candidates.extend(
            self.preference
                .iter()
                .map(String::as_str)
                .filter(|m| Some(*m) != preferred),
        );

        for (rank, candidate) in candidates.iter().enumerate() {
            if failed.contains(*candidate) {
                debug!(model = %candidate, "skipping model in failure set");
                continue;
            }

            if self.is_model_healthy(candidate).await {
                if rank > 0 {
                    info!(model = %candidate, "falling back to lower-preference model");
                }
                return Ok((*candidate).to_string());
            }

            warn!(model = %candidate, "health probe failed, trying next candidate");
        }

        Err(LlmError::model_unavailable(
            "No healthy model available in preference list",
        ))
    }

    /// Mark a model as failed. Idempotent.
    ///
    /// Selection skips failed models without probing until
    /// [`report_recovered`](Self::report_recovered) is called for them.
    pub async fn report_failure(&self, model: &str) {
        let mut failed = self.failed.write().await;
        if failed.insert(model.to_string()) {
            warn!(model = %model, "model marked as failed");
        }
    }

    /// Clear a model's failed mark. No-op if the model was not marked.
    ///
    /// The model becomes selectable again subject to a fresh probe passing
    /// on the next selection.
    pub async fn report_recovered(&self, model: &str) {
        let mut failed = self.failed.write().await;
        if failed.remove(model) {
            info!(model = %model, "model marked as recovered");
        }
    }

    /// Check whether a model is currently available on the backend.
    ///
    /// This is a point-in-time, backend-only check: the failure set is
    /// neither consulted nor updated, and a successful probe does not
    /// auto-recover a failed model. Every catalog error degrades to
    /// `false`, so this boundary never throws.
    pub async fn is_model_healthy(&self, model: &str) -> bool {
        match self.catalog.installed_models().await {
            Ok(models) => models.iter().any(|name| name == model),
            Err(error) => {
                warn!(model = %model, %error, "model catalog query failed");
                false
            }
        }
    }

    /// Models currently in the failure set, sorted for stable output
    pub async fn failed_models(&self) -> Vec<String> {
        let mut models: Vec<String> = self.failed.read().await.iter().cloned().collect();
        models.sort();
        models
    }

    /// The configured preference list
    pub fn preference_list(&self) -> &[String] {
        &self.preference
    }

    /// Whether health-tiered fallback is active
    pub fn is_fallback_enabled(&self) -> bool {
        self.fallback_enabled
    }
}
