//! Gemini provider: REST client for the `generateContent` endpoint.

mod client;
mod config;
mod convert;

pub use client::GeminiClient;
pub use config::{DEFAULT_TIMEOUT, GEMINI_API_BASE, GeminiConfig};
