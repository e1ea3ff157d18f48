//! Domain analysts: one [`Analyst`] type, specialized by [`AnalysisDomain`].
//!
//! Prompts differ per domain; the calling and error-handling contract is
//! identical across all three. An analyst never raises past its own boundary:
//! every internal failure becomes a [`TaskOutcome::Failure`].

use crate::{json, prompts};
use std::sync::Arc;
use venture_core::{
    AnalysisDomain, AnalysisResult, BusinessQuery, CompletionRequest, FailureKind, ModelClient,
    TaskOutcome,
};

pub struct Analyst {
    domain: AnalysisDomain,
    model: Arc<dyn ModelClient>,
}

impl Analyst {
    pub fn new(domain: AnalysisDomain, model: Arc<dyn ModelClient>) -> Self {
        Self { domain, model }
    }

    pub fn domain(&self) -> AnalysisDomain {
        self.domain
    }

    /// Run the analysis. Infallible by contract: one failing specialization
    /// must not abort its siblings or the dispatch as a whole.
    pub async fn run(&self, query: &BusinessQuery) -> TaskOutcome {
        let req = CompletionRequest::new(prompts::analysis_prompt(self.domain, query))
            .with_schema_hint(prompts::section_schema_hint(self.domain))
            .with_temperature(0.3)
            .with_max_output_tokens(1500);

        let raw = match self.model.complete(req).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(domain = %self.domain, error = %e, "analysis model call failed");
                return TaskOutcome::from_model_error(&e);
            }
        };

        match parse_analysis(self.domain, &raw) {
            Some(result) => TaskOutcome::success(result),
            None => {
                tracing::warn!(domain = %self.domain, "no recognizable sections in model output");
                TaskOutcome::failure(
                    FailureKind::MalformedResponse,
                    format!("{} response contained no recognizable sections", self.domain),
                )
            }
        }
    }
}

/// Parse a model response into a schema-stable result.
///
/// Any recovered subset of the domain's keys is padded to the full set with
/// the insufficient-data sentinel. Zero recovered keys means the response was
/// garbage, which is a malformed-response failure rather than an all-sentinel
/// success.
pub(crate) fn parse_analysis(domain: AnalysisDomain, raw: &str) -> Option<AnalysisResult> {
    let recovered = json::recover_sections(raw, domain.section_keys());
    if recovered.is_empty() {
        return None;
    }
    Some(AnalysisResult::from_sections(domain, recovered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use venture_core::{INSUFFICIENT_DATA, ModelError};
    use venture_model::MockModel;

    fn query() -> BusinessQuery {
        BusinessQuery::new("a specialty coffee shop", "Austin", "coffee shop")
    }

    #[tokio::test]
    async fn well_formed_response_yields_success() {
        let sections: Vec<String> = AnalysisDomain::Market
            .section_keys()
            .iter()
            .map(|k| format!("\"{k}\": \"data for {k}\""))
            .collect();
        let mock = MockModel::new("mock").with_response(format!("{{{}}}", sections.join(",")));
        let outcome = Analyst::new(AnalysisDomain::Market, Arc::new(mock)).run(&query()).await;

        let result = outcome.result().expect("expected success");
        assert!(result.is_complete());
        assert_eq!(result.section("market_overview"), Some("data for market_overview"));
    }

    #[tokio::test]
    async fn partial_response_is_padded_with_sentinel() {
        let mock = MockModel::new("mock")
            .with_response(r#"{"startup_costs": "about $50k", "funding_options": "SBA loans"}"#);
        let outcome = Analyst::new(AnalysisDomain::Financial, Arc::new(mock)).run(&query()).await;

        let result = outcome.result().expect("expected success");
        for key in AnalysisDomain::Financial.section_keys() {
            assert!(result.section(key).is_some(), "missing key {key}");
        }
        assert_eq!(result.section("startup_costs"), Some("about $50k"));
        assert_eq!(result.section("profit_margins"), Some(INSUFFICIENT_DATA));
    }

    #[tokio::test]
    async fn truncated_json_still_yields_schema_stable_result() {
        let mock = MockModel::new("mock").with_response(
            r#"{"competitors": "two incumbent chains", "market_positioning": "premiu"#,
        );
        let outcome = Analyst::new(AnalysisDomain::Competitive, Arc::new(mock)).run(&query()).await;

        let result = outcome.result().expect("expected success");
        assert_eq!(result.sections.len(), AnalysisDomain::Competitive.section_keys().len());
        assert_eq!(result.section("competitors"), Some("two incumbent chains"));
    }

    #[tokio::test]
    async fn garbage_response_is_a_malformed_failure() {
        let mock = MockModel::new("mock").with_response("I could not produce the analysis.");
        let outcome = Analyst::new(AnalysisDomain::Market, Arc::new(mock)).run(&query()).await;

        match outcome {
            TaskOutcome::Failure { kind, .. } => assert_eq!(kind, FailureKind::MalformedResponse),
            TaskOutcome::Success { .. } => panic!("garbage must not become a success"),
        }
    }

    #[tokio::test]
    async fn model_errors_become_failure_outcomes() {
        let mock = MockModel::new("mock").with_error(ModelError::RateLimited("HTTP 429".into()));
        let outcome = Analyst::new(AnalysisDomain::Financial, Arc::new(mock)).run(&query()).await;

        match outcome {
            TaskOutcome::Failure { kind, message } => {
                assert_eq!(kind, FailureKind::RateLimited);
                assert!(message.contains("429"));
            }
            TaskOutcome::Success { .. } => panic!("expected failure"),
        }
    }
}
