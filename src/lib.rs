//! textflow
//!
//! Sequential LLM text-transformation pipelines over the Gemini API:
//! - Closed set of transformation steps (clean, summarize, extract, tag)
//! - Strict step chaining with fixed pacing between provider calls
//! - Bounded exponential backoff for rate-limit failures
//! - One persisted record per run, completed or failed

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use config::ProviderConfig;
use domain::TextGenerator;
use infrastructure::{GeminiClient, HttpClient};

/// Create the text-generation provider from configuration
pub fn create_provider(config: &ProviderConfig) -> Arc<dyn TextGenerator> {
    Arc::new(GeminiClient::new(HttpClient::new(), config))
}
