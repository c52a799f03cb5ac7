//! Configuration for the model fallback coordinator
//!
//! Configuration is loaded in this order:
//! 1. Built-in defaults (the FoodSave Bielik preference chain)
//! 2. A TOML config file, if one is supplied
//! 3. `FOODSAVE_*` environment variable overrides

use crate::error::{LlmError, LlmResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_models() -> Vec<String> {
    vec![
        "bielik-4.5b".to_string(),
        "bielik-11b".to_string(),
        "gemma3:12b".to_string(),
    ]
}

fn default_fallback_enabled() -> bool {
    true
}

fn default_probe_timeout() -> Duration {
    Duration::from_secs(3)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(120)
}

/// Settings for the fallback coordinator and its Ollama backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Candidate models in preference order (most preferred first).
    /// Fixed for the coordinator's lifetime; reconfiguration requires
    /// constructing a new coordinator.
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// When false, model selection returns the preferred (or first
    /// configured) model without any health probing
    #[serde(default = "default_fallback_enabled")]
    pub fallback_enabled: bool,

    /// Timeout for a single health probe against the backend
    #[serde(with = "humantime_serde", default = "default_probe_timeout")]
    pub probe_timeout: Duration,

    /// Timeout for a chat/generate request
    #[serde(with = "humantime_serde", default = "default_request_timeout")]
    pub request_timeout: Duration,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            models: default_models(),
            fallback_enabled: default_fallback_enabled(),
            probe_timeout: default_probe_timeout(),
            request_timeout: default_request_timeout(),
        }
    }
}

impl FallbackConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> LlmResult<Self> {
        toml::from_str(content)
            .map_err(|e| LlmError::config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LlmResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LlmError::config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply `FOODSAVE_*` environment variable overrides
    ///
    /// Supported variables:
    /// - `FOODSAVE_OLLAMA_URL`: backend base URL
    /// - `FOODSAVE_MODELS`: comma-separated preference list
    /// - `FOODSAVE_FALLBACK_ENABLED`: `true`/`false`
    /// - `FOODSAVE_PROBE_TIMEOUT_SECS`: probe timeout in seconds
    pub fn apply_env(&mut self) -> LlmResult<()> {
        self.apply_vars(|name| env::var(name).ok())
    }

    fn apply_vars<F>(&mut self, lookup: F) -> LlmResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("FOODSAVE_OLLAMA_URL") {
            self.base_url = url;
        }

        if let Some(models) = lookup("FOODSAVE_MODELS") {
            self.models = models
                .split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect();
        }

        if let Some(enabled) = lookup("FOODSAVE_FALLBACK_ENABLED") {
            self.fallback_enabled = enabled
                .parse()
                .map_err(|_| LlmError::config("Invalid FOODSAVE_FALLBACK_ENABLED value"))?;
        }

        if let Some(secs) = lookup("FOODSAVE_PROBE_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| LlmError::config("Invalid FOODSAVE_PROBE_TIMEOUT_SECS value"))?;
            self.probe_timeout = Duration::from_secs(secs);
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> LlmResult<()> {
        if self.models.is_empty() {
            return Err(LlmError::config("No models configured"));
        }
        if self.base_url.trim().is_empty() {
            return Err(LlmError::config("Backend base URL must not be empty"));
        }
        Ok(())
    }
}
