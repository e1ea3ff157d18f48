//! Intent extraction: free-form user text → [`BusinessQuery`].

use crate::{json, prompts};
use serde::Deserialize;
use std::sync::Arc;
use venture_core::{BusinessQuery, CompletionRequest, ModelClient, Result, UNSPECIFIED, VentureError};

/// Model-side placeholders that normalize to the `"unspecified"` sentinel.
const MODEL_PLACEHOLDERS: [&str; 4] = ["unknown", "any", "n/a", "na"];

#[derive(Debug, Deserialize)]
struct RawExtraction {
    #[serde(default, alias = "business_type")]
    business: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    description: String,
}

/// Turns free-form user text into a structured [`BusinessQuery`] with one
/// model call and at most one parse-repair retry.
pub struct IntentExtractor {
    model: Arc<dyn ModelClient>,
}

impl IntentExtractor {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }

    pub async fn extract(&self, user_text: &str) -> Result<BusinessQuery> {
        if !user_text.chars().any(|c| c.is_alphabetic()) {
            return Err(VentureError::extraction(
                "input contains no alphabetic text to analyze",
            ));
        }

        let first = self.call(prompts::extraction_prompt(user_text)).await?;
        match parse_extraction(&first) {
            Some(raw) => Ok(build_query(raw, user_text)),
            None => {
                tracing::warn!("extraction response unparseable; issuing repair retry");
                let second = self.call(prompts::extraction_repair_prompt(user_text)).await?;
                match parse_extraction(&second) {
                    Some(raw) => Ok(build_query(raw, user_text)),
                    None => Err(VentureError::extraction_with_raw(
                        "model response could not be parsed into a business query after one repair attempt",
                        second,
                    )),
                }
            }
        }
    }

    async fn call(&self, prompt: String) -> Result<String> {
        let req = CompletionRequest::new(prompt)
            .with_schema_hint(prompts::extraction_schema_hint())
            .with_temperature(0.0)
            .with_max_output_tokens(200);
        // Extraction is fatal to the request, so a model-boundary failure here
        // is an extraction failure too.
        self.model
            .complete(req)
            .await
            .map_err(|e| VentureError::extraction(format!("model call failed: {e}")))
    }
}

fn parse_extraction(raw: &str) -> Option<RawExtraction> {
    let object = json::extract_json_object(raw)?;
    serde_json::from_str(object).ok()
}

fn build_query(raw: RawExtraction, user_text: &str) -> BusinessQuery {
    let business = normalize_field(raw.business);
    let location = normalize_field(raw.location);
    let mut description = normalize_field(raw.description);
    // Never leave the description empty: fall back to the user's own words.
    if description == UNSPECIFIED {
        description = user_text.trim().to_string();
    }
    BusinessQuery::new(description, location, business)
}

fn normalize_field(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || MODEL_PLACEHOLDERS.iter().any(|p| trimmed.eq_ignore_ascii_case(p))
    {
        UNSPECIFIED.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venture_model::MockModel;

    const COFFEE_TEXT: &str = "I want to open a coffee shop in Austin";

    fn extractor(mock: MockModel) -> IntentExtractor {
        IntentExtractor::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn well_formed_response_builds_query() {
        let mock = MockModel::new("mock").with_response(
            r#"{"business": "coffee shop", "location": "Austin", "description": "A specialty coffee shop in Austin."}"#,
        );
        let query = extractor(mock).extract(COFFEE_TEXT).await.unwrap();

        assert_eq!(query.business_type, "coffee shop");
        assert_eq!(query.location, "Austin");
        assert!(!query.description.is_empty());
        assert!(query.is_fully_specified());
    }

    #[tokio::test]
    async fn fenced_response_is_accepted() {
        let mock = MockModel::new("mock").with_response(
            "```json\n{\"business\": \"bakery\", \"location\": \"any\", \"description\": \"N/A\"}\n```",
        );
        let query = extractor(mock).extract("start a bakery").await.unwrap();

        assert_eq!(query.business_type, "bakery");
        assert_eq!(query.location, UNSPECIFIED);
        // Unspecified description falls back to the original text.
        assert_eq!(query.description, "start a bakery");
    }

    #[tokio::test]
    async fn repair_retry_is_invoked_exactly_once_and_succeeds() {
        let mock = Arc::new(
            MockModel::new("mock")
                .with_response("sorry, here is the info: business = coffee shop")
                .with_response(r#"{"business": "coffee shop", "location": "Austin", "description": "espresso bar"}"#),
        );
        let extractor = IntentExtractor::new(mock.clone());

        let query = extractor.extract(COFFEE_TEXT).await.unwrap();
        assert_eq!(query.business_type, "coffee shop");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn two_parse_failures_surface_extraction_error_with_raw() {
        let mock = MockModel::new("mock")
            .with_response("not json")
            .with_response("still not json");
        let err = extractor(mock).extract(COFFEE_TEXT).await.unwrap_err();

        match err {
            VentureError::Extraction { raw, .. } => {
                assert_eq!(raw.as_deref(), Some("still not json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_alphabetic_input_is_rejected_without_a_model_call() {
        let mock = MockModel::new("mock");
        let extractor = IntentExtractor::new(Arc::new(mock));
        let err = extractor.extract("12345 !!!").await.unwrap_err();
        assert!(matches!(err, VentureError::Extraction { .. }));
    }

    #[tokio::test]
    async fn model_failure_is_an_extraction_failure() {
        let mock = MockModel::new("mock")
            .with_error(venture_core::ModelError::Unavailable("503".into()));
        let err = extractor(mock).extract(COFFEE_TEXT).await.unwrap_err();
        assert!(matches!(err, VentureError::Extraction { .. }));
    }
}
