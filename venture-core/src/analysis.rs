use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel stored under any section key the model failed to fill.
///
/// Guarantees the per-domain section schema is stable regardless of model
/// output quality: consumers may index sections unconditionally.
pub const INSUFFICIENT_DATA: &str = "insufficient data";

/// The three analysis specializations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisDomain {
    Market,
    Competitive,
    Financial,
}

impl AnalysisDomain {
    pub const ALL: [AnalysisDomain; 3] =
        [AnalysisDomain::Market, AnalysisDomain::Competitive, AnalysisDomain::Financial];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisDomain::Market => "market",
            AnalysisDomain::Competitive => "competitive",
            AnalysisDomain::Financial => "financial",
        }
    }

    /// The fixed section-key set every result for this domain must carry.
    pub fn section_keys(&self) -> &'static [&'static str] {
        match self {
            AnalysisDomain::Market => &[
                "market_overview",
                "target_customers",
                "regulatory_environment",
                "swot_analysis",
                "emerging_trends",
                "key_recommendations",
            ],
            AnalysisDomain::Competitive => &[
                "competitors",
                "competitor_profiles",
                "market_positioning",
                "strengths_weaknesses",
                "opportunities_threats",
                "strategic_recommendations",
            ],
            AnalysisDomain::Financial => &[
                "startup_costs",
                "revenue_potential",
                "funding_options",
                "profit_margins",
                "financial_risks",
                "strategic_recommendations",
            ],
        }
    }
}

impl std::fmt::Display for AnalysisDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One domain's analysis, keyed by that domain's fixed section set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub domain: AnalysisDomain,
    pub sections: BTreeMap<String, String>,
}

impl AnalysisResult {
    /// Build a result from whatever sections were recovered, padding every
    /// missing or empty section with the [`INSUFFICIENT_DATA`] sentinel and
    /// dropping keys the domain does not declare.
    pub fn from_sections(domain: AnalysisDomain, mut recovered: BTreeMap<String, String>) -> Self {
        let mut sections = BTreeMap::new();
        for key in domain.section_keys() {
            let value = recovered
                .remove(*key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| INSUFFICIENT_DATA.to_string());
            sections.insert((*key).to_string(), value);
        }
        Self { domain, sections }
    }

    pub fn section(&self, key: &str) -> Option<&str> {
        self.sections.get(key).map(String::as_str)
    }

    /// True when no section carries the insufficient-data sentinel.
    pub fn is_complete(&self) -> bool {
        self.sections.values().all(|v| v != INSUFFICIENT_DATA)
    }
}
