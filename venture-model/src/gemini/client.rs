//! Gemini client implementation.

use super::config::GeminiConfig;
use super::convert::{self, GenerateContentResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use venture_core::{CompletionRequest, ModelClient, ModelError, ModelResult, VentureError};

/// Gemini client speaking the `generateContent` REST endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use venture_model::gemini::{GeminiClient, GeminiConfig};
///
/// let client = GeminiClient::new(GeminiConfig::from_env()?)?;
/// ```
#[derive(Debug)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, VentureError> {
        if config.api_key.trim().is_empty() {
            return Err(VentureError::Config("Gemini API key is empty".to_string()));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| VentureError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Build the API URL for content generation.
    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.effective_base_url().trim_end_matches('/'),
            self.config.model
        )
    }

    fn map_status(status: StatusCode, body: String) -> ModelError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                ModelError::RateLimited(format!("HTTP 429: {body}"))
            }
            s if s.is_server_error() || s == StatusCode::REQUEST_TIMEOUT => {
                ModelError::Unavailable(format!("HTTP {s}: {body}"))
            }
            s => ModelError::Unavailable(format!("unexpected HTTP {s}: {body}")),
        }
    }

    fn map_transport(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Timeout(self.config.timeout)
        } else {
            ModelError::Unavailable(format!("Gemini API request failed: {err}"))
        }
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, req: CompletionRequest) -> ModelResult<String> {
        let wire_request = convert::to_wire_request(&req);

        let response = self
            .client
            .post(self.api_url())
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status(status, body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ModelError::Unavailable(format!("failed to read response: {e}")))?;

        let wire_response: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| ModelError::MalformedResponse(format!("{e} - {body}")))?;

        let text = convert::from_wire_response(wire_response)?;
        tracing::debug!(model = %self.config.model, chars = text.len(), "model call completed");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn empty_api_key_is_rejected() {
        let err = GeminiClient::new(GeminiConfig::flash("  ")).unwrap_err();
        assert!(matches!(err, VentureError::Config(_)));
    }

    #[test]
    fn api_url_includes_model() {
        let client = GeminiClient::new(
            GeminiConfig::new("key", "gemini-2.0-flash")
                .with_base_url("http://localhost:9000/v1beta/"),
        )
        .unwrap();
        assert_eq!(
            client.api_url(),
            "http://localhost:9000/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            GeminiClient::map_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            ModelError::RateLimited(_)
        ));
        assert!(matches!(
            GeminiClient::map_status(StatusCode::SERVICE_UNAVAILABLE, String::new()),
            ModelError::Unavailable(_)
        ));
        assert!(matches!(
            GeminiClient::map_status(StatusCode::BAD_REQUEST, String::new()),
            ModelError::Unavailable(_)
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_maps_to_unavailable() {
        // Port 9 (discard) refuses connections immediately on loopback.
        let client = GeminiClient::new(
            GeminiConfig::flash("key")
                .with_base_url("http://127.0.0.1:9/v1beta")
                .with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        let err = client.complete(CompletionRequest::new("hello")).await.unwrap_err();
        assert!(matches!(err, ModelError::Unavailable(_) | ModelError::Timeout(_)));
    }
}
