//! Configuration types for the Gemini provider.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use venture_core::VentureError;

/// Default Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default per-call timeout. Model calls that exceed it surface as
/// `ModelError::Timeout`.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the Gemini API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Gemini API key.
    pub api_key: String,
    /// Model name, e.g. `gemini-2.0-flash`.
    pub model: String,
    /// Optional custom base URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Per-call timeout.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.0-flash".to_string(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), model: model.into(), ..Default::default() }
    }

    /// Create a config for the gemini-2.0-flash model.
    pub fn flash(api_key: impl Into<String>) -> Self {
        Self::new(api_key, "gemini-2.0-flash")
    }

    /// Create a config for the gemini-1.5-flash model (smaller, cheaper).
    pub fn flash_15(api_key: impl Into<String>) -> Self {
        Self::new(api_key, "gemini-1.5-flash")
    }

    /// Read the API key from `GEMINI_API_KEY`, falling back to
    /// `GOOGLE_API_KEY`. Configuration is built once at startup; business
    /// logic never touches the environment.
    pub fn from_env() -> Result<Self, VentureError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| {
                VentureError::Config(
                    "GEMINI_API_KEY (or GOOGLE_API_KEY) is not set".to_string(),
                )
            })?;
        Ok(Self::flash(api_key))
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the effective base URL.
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(GEMINI_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_config_defaults() {
        let config = GeminiConfig::flash("key");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.effective_base_url(), GEMINI_API_BASE);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn custom_base_url_overrides_default() {
        let config = GeminiConfig::flash("key").with_base_url("http://localhost:9000/v1beta");
        assert_eq!(config.effective_base_url(), "http://localhost:9000/v1beta");
    }
}
