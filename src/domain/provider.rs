//! Text generation provider seam

use std::fmt::Debug;

use async_trait::async_trait;

use super::error::EngineError;

/// Trait for the external text-generation provider.
///
/// One call, one outbound request: given a prompt, return the completion
/// text or a classified [`EngineError`]. Transport details live behind this
/// seam; the engine only cares whether a failure is transient.
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    /// Request a completion for `prompt`
    async fn generate(&self, prompt: &str) -> Result<String, EngineError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
