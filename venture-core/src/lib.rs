//! # venture-core
//!
//! Core types and traits for VentureVision business-idea analysis.
//!
//! This crate provides the shared vocabulary of the pipeline:
//!
//! - [`BusinessQuery`] - the structured idea extracted from user text
//! - [`AnalysisDomain`] / [`AnalysisResult`] - the three specializations and
//!   their schema-stable section maps
//! - [`TaskOutcome`] / [`AnalysisBundle`] - per-task results and the join
//!   barrier's aggregate
//! - [`ExecutiveSummary`] - the terminal artifact of a successful request
//! - [`ModelClient`] - the provider-agnostic model seam
//! - [`VentureError`] / [`Result`] - unified error handling

pub mod analysis;
pub mod error;
pub mod model;
pub mod outcome;
pub mod query;
pub mod summary;

pub use analysis::{AnalysisDomain, AnalysisResult, INSUFFICIENT_DATA};
pub use error::{ModelError, Result, VentureError};
pub use model::{CompletionRequest, ModelClient, ModelResult};
pub use outcome::{AnalysisBundle, FailureKind, TaskOutcome};
pub use query::{BusinessQuery, UNSPECIFIED};
pub use summary::{Citation, ExecutiveSummary, SUMMARY_POINT_COUNT, SummaryPoint};
