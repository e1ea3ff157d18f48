use crate::analysis::{AnalysisDomain, AnalysisResult};
use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Why one analysis task failed. Mirrors [`ModelError`] without payloads so it
/// can travel inside outcome data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    RateLimited,
    Unavailable,
    MalformedResponse,
}

impl From<&ModelError> for FailureKind {
    fn from(err: &ModelError) -> Self {
        match err {
            ModelError::Timeout(_) => FailureKind::Timeout,
            ModelError::RateLimited(_) => FailureKind::RateLimited,
            ModelError::Unavailable(_) => FailureKind::Unavailable,
            ModelError::MalformedResponse(_) => FailureKind::MalformedResponse,
        }
    }
}

/// Terminal result of one analysis task. Analysts never raise past their own
/// boundary; failures become data here so one specialization cannot abort its
/// siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TaskOutcome {
    Success { result: AnalysisResult },
    Failure { kind: FailureKind, message: String },
}

impl TaskOutcome {
    pub fn success(result: AnalysisResult) -> Self {
        Self::Success { result }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure { kind, message: message.into() }
    }

    pub fn from_model_error(err: &ModelError) -> Self {
        Self::Failure { kind: err.into(), message: err.to_string() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Success { result } => Some(result),
            Self::Failure { .. } => None,
        }
    }
}

/// All three outcomes, produced by the dispatcher only once every task has
/// settled. Immutable; the synthesis agent never observes a partial bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisBundle {
    pub market: TaskOutcome,
    pub competitive: TaskOutcome,
    pub financial: TaskOutcome,
}

impl AnalysisBundle {
    pub fn outcome(&self, domain: AnalysisDomain) -> &TaskOutcome {
        match domain {
            AnalysisDomain::Market => &self.market,
            AnalysisDomain::Competitive => &self.competitive,
            AnalysisDomain::Financial => &self.financial,
        }
    }

    /// Successful results in domain order.
    pub fn successes(&self) -> Vec<(AnalysisDomain, &AnalysisResult)> {
        AnalysisDomain::ALL
            .iter()
            .filter_map(|d| self.outcome(*d).result().map(|r| (*d, r)))
            .collect()
    }

    /// Failed domains with their kind and message, in domain order.
    pub fn failures(&self) -> Vec<(AnalysisDomain, FailureKind, &str)> {
        AnalysisDomain::ALL
            .iter()
            .filter_map(|d| match self.outcome(*d) {
                TaskOutcome::Failure { kind, message } => Some((*d, *kind, message.as_str())),
                TaskOutcome::Success { .. } => None,
            })
            .collect()
    }

    pub fn all_failed(&self) -> bool {
        self.successes().is_empty()
    }
}
