//! Synthesis agent: merges all analysis outcomes into one executive summary
//! via a second model call, with a single bounded repair retry.

use crate::{json, prompts};
use std::sync::Arc;
use venture_core::{
    AnalysisBundle, CompletionRequest, ExecutiveSummary, ModelClient, Result, VentureError,
};

pub struct SynthesisAgent {
    model: Arc<dyn ModelClient>,
}

impl SynthesisAgent {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }

    /// Build the aggregation prompt from the complete bundle, issue one model
    /// call, and validate the structured response. Model-call and parse
    /// failures alike surface as [`VentureError::Synthesis`] so the
    /// orchestrator can degrade to the raw bundle.
    pub async fn synthesize(&self, bundle: &AnalysisBundle) -> Result<ExecutiveSummary> {
        let prompt = prompts::synthesis_prompt(bundle)?;
        let raw = self.call(prompt).await?;

        match parse_summary(&raw) {
            Ok(summary) => Ok(summary),
            Err(reason) => {
                tracing::warn!(%reason, "summary response invalid; issuing repair retry");
                let repaired = self.call(prompts::synthesis_repair_prompt(&raw)).await?;
                parse_summary(&repaired).map_err(|reason| {
                    VentureError::synthesis_with_raw(
                        format!("summary unparseable after one repair attempt: {reason}"),
                        repaired.clone(),
                    )
                })
            }
        }
    }

    async fn call(&self, prompt: String) -> Result<String> {
        let req = CompletionRequest::new(prompt)
            .with_schema_hint(prompts::summary_schema_hint())
            .with_temperature(0.3)
            .with_max_output_tokens(1800);
        self.model
            .complete(req)
            .await
            .map_err(|e| VentureError::synthesis(format!("model call failed: {e}")))
    }
}

fn parse_summary(raw: &str) -> std::result::Result<ExecutiveSummary, String> {
    let object = json::extract_json_object(raw).ok_or("no JSON object in response")?;
    let mut summary: ExecutiveSummary =
        serde_json::from_str(object).map_err(|e| e.to_string())?;
    summary.validate()?;
    summary.ensure_citations();
    Ok(summary)
}
