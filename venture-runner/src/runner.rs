use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use venture_agent::{DispatchConfig, IntentExtractor, SynthesisAgent, dispatch};
use venture_core::{
    AnalysisBundle, BusinessQuery, ExecutiveSummary, ModelClient, Result, VentureError,
};

/// Per-request lifecycle. Terminal states mirror how the request ended:
/// `Done` (full summary), `DegradedDone` (bundle without summary), `Failed`
/// (extraction failed, nothing to analyze).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Extracting,
    Dispatching,
    Synthesizing,
    Done,
    DegradedDone,
    Failed,
}

/// Why a request ended degraded rather than complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DegradedReason {
    /// Synthesis could not produce a valid summary from a bundle that held at
    /// least one successful analysis.
    SynthesisFailed { message: String },
    /// Every analysis task failed; synthesis was still attempted but there was
    /// no insight to summarize.
    NoAnalysisSucceeded,
}

/// Terminal result of one request. Extraction failure is the `Err` path of
/// [`Analyzer::analyze`]; everything that reaches the dispatcher resolves to
/// one of these.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisReport {
    /// Extraction, dispatch and synthesis all succeeded.
    Complete { query: BusinessQuery, summary: ExecutiveSummary, bundle: AnalysisBundle },
    /// Synthesis failed; the raw bundle is returned as a degraded-but-useful
    /// partial result rather than nothing.
    Degraded { query: BusinessQuery, bundle: AnalysisBundle, reason: DegradedReason },
}

impl AnalysisReport {
    pub fn phase(&self) -> Phase {
        match self {
            AnalysisReport::Complete { .. } => Phase::Done,
            AnalysisReport::Degraded { .. } => Phase::DegradedDone,
        }
    }

    pub fn bundle(&self) -> &AnalysisBundle {
        match self {
            AnalysisReport::Complete { bundle, .. } | AnalysisReport::Degraded { bundle, .. } => {
                bundle
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Upper bound on each analysis task. Treated as configuration, never a
    /// hidden default inside business logic.
    pub task_timeout: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self { task_timeout: Duration::from_secs(90) }
    }
}

/// The orchestrator: composes intent extraction, concurrent dispatch, and
/// synthesis, and owns the end-to-end error policy.
pub struct Analyzer {
    model: Arc<dyn ModelClient>,
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model, config: AnalyzerConfig::default() }
    }

    #[must_use]
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one stateless end-to-end analysis.
    ///
    /// Error policy: extraction failure is fatal (`Err`); analysis failures
    /// are data inside the bundle; synthesis failure degrades to the raw
    /// bundle. The caller always gets a terminal, fully-populated result.
    pub async fn analyze(&self, user_text: &str) -> Result<AnalysisReport> {
        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("analyze", %request_id, model = self.model.name());
        self.analyze_inner(user_text).instrument(span).await
    }

    async fn analyze_inner(&self, user_text: &str) -> Result<AnalysisReport> {
        tracing::info!(phase = ?Phase::Extracting, "extracting business intent");
        let extractor = IntentExtractor::new(self.model.clone());
        let query = match extractor.extract(user_text).await {
            Ok(query) => query,
            Err(e) => {
                tracing::warn!(phase = ?Phase::Failed, error = %e, "extraction failed; request aborted");
                return Err(e);
            }
        };

        tracing::info!(
            phase = ?Phase::Dispatching,
            business_type = %query.business_type,
            location = %query.location,
            "dispatching analysis tasks"
        );
        let dispatch_config = DispatchConfig { task_timeout: self.config.task_timeout };
        let bundle = dispatch(self.model.clone(), &query, &dispatch_config).await;
        for (domain, kind, message) in bundle.failures() {
            tracing::warn!(%domain, ?kind, message, "analysis task failed");
        }

        tracing::info!(phase = ?Phase::Synthesizing, "synthesizing executive summary");
        let synthesis = SynthesisAgent::new(self.model.clone());
        let report = match synthesis.synthesize(&bundle).await {
            Ok(summary) => {
                tracing::info!(phase = ?Phase::Done, "analysis complete");
                AnalysisReport::Complete { query, summary, bundle }
            }
            Err(e) => {
                let reason = if bundle.all_failed() {
                    DegradedReason::NoAnalysisSucceeded
                } else {
                    DegradedReason::SynthesisFailed { message: degraded_message(&e) }
                };
                tracing::warn!(phase = ?Phase::DegradedDone, error = %e, "returning degraded result");
                AnalysisReport::Degraded { query, bundle, reason }
            }
        };
        Ok(report)
    }
}

fn degraded_message(err: &VentureError) -> String {
    match err {
        VentureError::Synthesis { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
