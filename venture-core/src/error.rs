use std::time::Duration;

/// Failure modes of the model-client boundary.
///
/// Every provider implementation maps its transport and payload failures into
/// one of these variants so the rest of the system never sees provider detail.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    #[error("model endpoint rate limited: {0}")]
    RateLimited(String),

    #[error("model endpoint unavailable: {0}")]
    Unavailable(String),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum VentureError {
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// The user's text could not be turned into a [`crate::BusinessQuery`]
    /// even after one repair attempt. Fatal to the whole request.
    #[error("extraction failed: {message}")]
    Extraction { message: String, raw: Option<String> },

    /// The executive summary could not be parsed after one repair attempt.
    /// Non-fatal: the orchestrator degrades to returning the raw bundle.
    #[error("synthesis failed: {message}")]
    Synthesis { message: String, raw: Option<String> },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl VentureError {
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction { message: message.into(), raw: None }
    }

    pub fn extraction_with_raw(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Extraction { message: message.into(), raw: Some(raw.into()) }
    }

    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis { message: message.into(), raw: None }
    }

    pub fn synthesis_with_raw(message: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Synthesis { message: message.into(), raw: Some(raw.into()) }
    }
}

pub type Result<T> = std::result::Result<T, VentureError>;
