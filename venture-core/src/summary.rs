use crate::analysis::AnalysisDomain;
use serde::{Deserialize, Serialize};

/// The executive summary always carries exactly this many points.
pub const SUMMARY_POINT_COUNT: usize = 5;

/// One point of the executive summary, traceable to the domains it draws on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryPoint {
    pub headline: String,
    pub detail: String,
    pub sources: Vec<AnalysisDomain>,
}

/// A reference back into the analysis bundle supporting the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub domain: AnalysisDomain,
    /// Section key within the domain's result, e.g. `startup_costs`.
    pub section: String,
}

/// Terminal artifact of a fully successful request: a five-point summary plus
/// source citations. Parsed from model output and validated before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub points: Vec<SummaryPoint>,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

impl ExecutiveSummary {
    /// Structural validation: exactly five points, each citing at least one
    /// source domain. Returns a human-readable reason on failure so the
    /// synthesis agent can feed it into the repair prompt.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.points.len() != SUMMARY_POINT_COUNT {
            return Err(format!(
                "expected exactly {SUMMARY_POINT_COUNT} summary points, got {}",
                self.points.len()
            ));
        }
        for (i, point) in self.points.iter().enumerate() {
            if point.headline.trim().is_empty() {
                return Err(format!("summary point {} has an empty headline", i + 1));
            }
            if point.detail.trim().is_empty() {
                return Err(format!("summary point {} has an empty detail", i + 1));
            }
            if point.sources.is_empty() {
                return Err(format!("summary point {} cites no source domain", i + 1));
            }
        }
        Ok(())
    }

    /// Fill an empty citations list from the points' sources so the output
    /// shape stays stable even when the model omits citations.
    pub fn ensure_citations(&mut self) {
        if !self.citations.is_empty() {
            return;
        }
        let mut seen = Vec::new();
        for point in &self.points {
            for domain in &point.sources {
                if !seen.contains(domain) {
                    seen.push(*domain);
                }
            }
        }
        self.citations = seen
            .into_iter()
            .map(|domain| Citation { domain, section: "summary".to_string() })
            .collect();
    }
}
