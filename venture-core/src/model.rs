use crate::error::ModelError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// The model-client seam: plain text in, plain text out.
///
/// The core never depends on a specific provider's wire format. Implementations
/// live in `venture-model` (Gemini over REST, plus a scriptable mock).
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Provider/model identifier, used for logging only.
    fn name(&self) -> &str;

    async fn complete(&self, req: CompletionRequest) -> ModelResult<String>;
}

/// One outbound completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    /// Optional JSON-shape hint. Providers that support structured output use
    /// it to request `application/json`; others append it to the prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), schema_hint: None, temperature: None, max_output_tokens: None }
    }

    #[must_use]
    pub fn with_schema_hint(mut self, hint: impl Into<String>) -> Self {
        self.schema_hint = Some(hint.into());
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn with_max_output_tokens(mut self, max_output_tokens: i32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}
