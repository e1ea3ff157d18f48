//! # venture-runner
//!
//! End-to-end orchestration: user text → [`venture_core::BusinessQuery`] →
//! concurrent analysis dispatch → executive-summary synthesis, with the
//! degraded-result policy in one place.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use venture_model::{GeminiClient, GeminiConfig};
//! use venture_runner::Analyzer;
//!
//! let model = Arc::new(GeminiClient::new(GeminiConfig::from_env()?)?);
//! let report = Analyzer::new(model).analyze("a coffee shop in Austin").await?;
//! ```

pub mod runner;

pub use runner::{AnalysisReport, Analyzer, AnalyzerConfig, DegradedReason, Phase};
