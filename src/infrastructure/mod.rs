pub mod engine;
pub mod gemini;
pub mod health;
pub mod http_client;
pub mod logging;
pub mod retry;
pub mod runner;
pub mod store;

pub use engine::PipelineEngine;
pub use gemini::GeminiClient;
pub use health::{HealthProber, ProbeReport, ProbeStatus};
pub use http_client::HttpClient;
pub use retry::{with_retry, RetryPolicy};
pub use runner::WorkflowRunner;
pub use store::{InMemoryDefinitionStore, InMemoryRunSink, JsonlRunSink};
