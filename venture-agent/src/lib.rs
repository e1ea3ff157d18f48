//! # venture-agent
//!
//! The agents of the VentureVision pipeline:
//!
//! - [`extractor::IntentExtractor`] - free-form text → [`venture_core::BusinessQuery`]
//! - [`analyst::Analyst`] - one domain analysis per [`venture_core::AnalysisDomain`]
//! - [`dispatcher::dispatch`] - concurrent fan-out/fan-in of all three analysts
//! - [`synthesis::SynthesisAgent`] - bundle → executive summary
//!
//! Model responses are treated as untrusted input throughout: strict parse,
//! one bounded repair retry, and a guaranteed-complete fallback schema.

pub mod analyst;
pub mod dispatcher;
pub mod extractor;
pub mod json;
pub mod prompts;
pub mod synthesis;

pub use analyst::Analyst;
pub use dispatcher::{DispatchConfig, dispatch};
pub use extractor::IntentExtractor;
pub use synthesis::SynthesisAgent;
