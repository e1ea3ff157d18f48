//! # venture-model
//!
//! Model-client implementations behind the [`venture_core::ModelClient`] seam:
//!
//! - [`gemini::GeminiClient`] - Gemini over the `generateContent` REST endpoint
//! - [`mock::MockModel`] - scriptable client for tests

pub mod gemini;
pub mod mock;

pub use gemini::{GeminiClient, GeminiConfig};
pub use mock::MockModel;
