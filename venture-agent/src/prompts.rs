//! Prompt assembly for every model call in the pipeline.
//!
//! Prompt text is data, not logic: everything here is pure string building so
//! the agents stay testable without a live model.

use venture_core::{AnalysisBundle, AnalysisDomain, BusinessQuery};

pub fn extraction_prompt(user_text: &str) -> String {
    format!(
        r#"From the user's input, perform two tasks:

1. Extract information:
   - business: the type of business or startup the user wants to start.
   - location: any specific location mentioned.

2. Generate a description:
   - description: a concise description of the business idea. Generate one
     yourself if the user's input is very short.

Respond ONLY in pure JSON, structured as follows:
{{
    "business": "Bakery",
    "location": "Mumbai",
    "description": "A cozy bakery offering a variety of breads and pastries."
}}

If a piece of information is missing or unclear, use "unknown" for business and
"any" for location. If no clear description can be generated, use "N/A".

User input: "{user_text}"
"#
    )
}

pub fn extraction_repair_prompt(user_text: &str) -> String {
    format!(
        r#"Your previous answer was not valid JSON. Return ONLY a single JSON
object with exactly the keys "business", "location" and "description" - no
markdown, no commentary, nothing outside the object.

User input: "{user_text}"
"#
    )
}

const MARKET_INSTRUCTION: &str = r#"You are an elite market research analyst
delivering in-depth, data-driven, actionable reports for new business ventures.
Analyze the provided business type, location and description to uncover critical
market dynamics: market size and growth trends, target customer demographics and
behavior, the regulatory environment, a SWOT assessment, and emerging trends or
disruptors. Maintain a professional, objective, data-driven tone. For any aspect
where reliable information is unavailable, state "insufficient data" for that
section rather than omitting it."#;

const COMPETITIVE_INSTRUCTION: &str = r#"You are an elite competitive intelligence analyst
delivering in-depth, actionable competitive analysis for
new business ventures. Analyze the provided business type, location and
description to uncover the competitive landscape: the most significant direct
and indirect competitors, their profiles and positioning, strengths and
weaknesses, opportunities and threats, and prioritized strategic
recommendations. For any aspect where reliable information is unavailable,
state "insufficient data" for that section rather than omitting it."#;

const FINANCIAL_INSTRUCTION: &str = r#"You are a top-tier financial analyst for
startups delivering a clear, data-driven, actionable financial viability
assessment. Cover estimated startup costs, realistic revenue potential, funding
options and strategies, expected profit margins, major financial risks with
mitigations, and prioritized financial recommendations. For any aspect where
reliable information is unavailable, state "insufficient data" for that section
rather than omitting it."#;

fn instruction_for(domain: AnalysisDomain) -> &'static str {
    match domain {
        AnalysisDomain::Market => MARKET_INSTRUCTION,
        AnalysisDomain::Competitive => COMPETITIVE_INSTRUCTION,
        AnalysisDomain::Financial => FINANCIAL_INSTRUCTION,
    }
}

pub fn analysis_prompt(domain: AnalysisDomain, query: &BusinessQuery) -> String {
    format!(
        "{}\n\nPerform an in-depth {} analysis for the business '{}' in '{}' \
         with the following description: {}\n\nOutput ONLY a JSON object; do not \
         include your reasoning or any content outside it.",
        instruction_for(domain),
        domain,
        query.business_type,
        query.location,
        query.description,
    )
}

/// JSON skeleton listing a domain's required section keys.
pub fn section_schema_hint(domain: AnalysisDomain) -> String {
    let fields: Vec<String> =
        domain.section_keys().iter().map(|k| format!("  \"{k}\": \"...\"")).collect();
    format!("{{\n{}\n}}", fields.join(",\n"))
}

pub fn extraction_schema_hint() -> String {
    "{\n  \"business\": \"...\",\n  \"location\": \"...\",\n  \"description\": \"...\"\n}"
        .to_string()
}

pub fn summary_schema_hint() -> String {
    r#"{
  "points": [
    {"headline": "...", "detail": "...", "sources": ["market", "competitive", "financial"]},
    {"headline": "...", "detail": "...", "sources": ["..."]},
    {"headline": "...", "detail": "...", "sources": ["..."]},
    {"headline": "...", "detail": "...", "sources": ["..."]},
    {"headline": "...", "detail": "...", "sources": ["..."]}
  ],
  "citations": [
    {"domain": "financial", "section": "startup_costs"}
  ]
}"#
    .to_string()
}

/// Build the synthesis prompt: successful analyses embedded verbatim, failed
/// domains called out explicitly so the summary acknowledges gaps instead of
/// silently omitting them.
pub fn synthesis_prompt(bundle: &AnalysisBundle) -> Result<String, serde_json::Error> {
    let mut prompt = String::from(
        "You are the lead analyst compiling an executive summary of a business \
         idea from the domain analyses below.\n\n",
    );

    for (domain, result) in bundle.successes() {
        prompt.push_str(&format!("## {domain} analysis\n"));
        prompt.push_str(&serde_json::to_string_pretty(&result.sections)?);
        prompt.push_str("\n\n");
    }
    for (domain, kind, message) in bundle.failures() {
        prompt.push_str(&format!(
            "## {domain} analysis\nUNAVAILABLE ({kind:?}: {message}). Acknowledge this \
             gap where relevant; do not invent {domain} data.\n\n",
        ));
    }

    prompt.push_str(
        "Produce an executive summary of exactly five points. Each point has a \
         short headline, a detail paragraph, and a \"sources\" list naming the \
         domains it draws on (\"market\", \"competitive\", \"financial\"). Add a \
         \"citations\" list referencing the specific sections that support the \
         summary. If every analysis is unavailable, still return five points \
         stating that no insight could be produced and why. Output ONLY the JSON \
         object.",
    );
    Ok(prompt)
}

pub fn synthesis_repair_prompt(invalid_output: &str) -> String {
    format!(
        "Your previous output was not valid JSON for the requested executive \
         summary schema. Re-emit it STRICTLY as JSON: a single object with a \
         \"points\" array of exactly five entries (headline, detail, sources) \
         and a \"citations\" array. No markdown, no commentary.\n\n\
         Previous output:\n{invalid_output}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use venture_core::{AnalysisResult, FailureKind, TaskOutcome};

    fn query() -> BusinessQuery {
        BusinessQuery::new("a cozy specialty coffee shop", "Austin", "coffee shop")
    }

    #[test]
    fn analysis_prompt_embeds_query_fields() {
        let prompt = analysis_prompt(AnalysisDomain::Market, &query());
        assert!(prompt.contains("coffee shop"));
        assert!(prompt.contains("Austin"));
        assert!(prompt.contains("market research analyst"));
    }

    #[test]
    fn section_schema_hint_lists_every_key() {
        let hint = section_schema_hint(AnalysisDomain::Financial);
        for key in AnalysisDomain::Financial.section_keys() {
            assert!(hint.contains(key), "hint is missing {key}");
        }
    }

    #[test]
    fn synthesis_prompt_embeds_successes_and_flags_failures() {
        let mut sections = BTreeMap::new();
        sections.insert("market_overview".to_string(), "growing fast".to_string());
        let bundle = AnalysisBundle {
            market: TaskOutcome::success(AnalysisResult::from_sections(
                AnalysisDomain::Market,
                sections,
            )),
            competitive: TaskOutcome::failure(FailureKind::Timeout, "no response within 30s"),
            financial: TaskOutcome::failure(FailureKind::RateLimited, "HTTP 429"),
        };

        let prompt = synthesis_prompt(&bundle).unwrap();
        assert!(prompt.contains("growing fast"));
        assert!(prompt.contains("## competitive analysis\nUNAVAILABLE (Timeout"));
        assert!(prompt.contains("## financial analysis\nUNAVAILABLE (RateLimited"));
        assert!(prompt.contains("exactly five points"));
    }
}
