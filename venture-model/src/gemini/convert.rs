//! Wire types for the Gemini `generateContent` endpoint and conversions
//! to/from the provider-agnostic [`CompletionRequest`].

use serde::{Deserialize, Serialize};
use venture_core::{CompletionRequest, ModelError};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<WireContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePart {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<WireContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Build the wire request. A schema hint is appended to the prompt and flips
/// the response MIME type to JSON; Gemini then emits the object without
/// markdown fencing in most cases.
pub fn to_wire_request(req: &CompletionRequest) -> GenerateContentRequest {
    let mut text = req.prompt.clone();
    if let Some(hint) = &req.schema_hint {
        text.push_str("\n\nRespond ONLY with a JSON object of this exact shape:\n");
        text.push_str(hint);
    }

    let generation_config = if req.temperature.is_some()
        || req.max_output_tokens.is_some()
        || req.schema_hint.is_some()
    {
        Some(GenerationConfig {
            temperature: req.temperature,
            max_output_tokens: req.max_output_tokens,
            response_mime_type: req.schema_hint.as_ref().map(|_| "application/json".to_string()),
        })
    } else {
        None
    };

    GenerateContentRequest {
        contents: vec![WireContent {
            role: Some("user".to_string()),
            parts: vec![WirePart { text }],
        }],
        generation_config,
    }
}

/// Extract the response text from the first candidate. An empty or absent
/// candidate payload is malformed: the caller asked for text and got none.
pub fn from_wire_response(resp: GenerateContentResponse) -> Result<String, ModelError> {
    let text: String = resp
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content.parts.iter().map(|p| p.text.as_str()).collect::<Vec<_>>().join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ModelError::MalformedResponse(
            "response carried no candidate text".to_string(),
        ));
    }
    Ok(text)
}
