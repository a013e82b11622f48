//! Sequential pipeline execution engine

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::retry::{with_retry, RetryPolicy};
use crate::config::EngineConfig;
use crate::domain::{build_prompt, EngineError, ExecutionResult, StepKind, StepOutcome, TextGenerator};

/// Drives an ordered step sequence through the provider, one call at a time.
///
/// A run is a strict chain: each step's output is the next step's input, so
/// no two provider calls for one run are ever in flight together. Between
/// consecutive calls the engine always pauses for the configured step delay,
/// independent of any backoff served inside the retrier, to stay under
/// steady-state quota. Cancellation is honored at every suspension point.
pub struct PipelineEngine {
    provider: Arc<dyn TextGenerator>,
    retry: RetryPolicy,
    step_delay: Duration,
}

impl std::fmt::Debug for PipelineEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineEngine")
            .field("retry", &self.retry)
            .field("step_delay", &self.step_delay)
            .finish()
    }
}

impl PipelineEngine {
    pub fn new(provider: Arc<dyn TextGenerator>, config: &EngineConfig) -> Self {
        Self {
            provider,
            retry: RetryPolicy::new(config.max_attempts),
            step_delay: Duration::from_millis(config.step_delay_ms),
        }
    }

    /// Process exactly one step: build the prompt, then generate with retry.
    ///
    /// Propagates provider and retrier errors unchanged; adds no error kinds
    /// of its own.
    pub async fn run_step(
        &self,
        kind: StepKind,
        input: &str,
        cancel: &CancellationToken,
    ) -> Result<String, EngineError> {
        let prompt = build_prompt(kind, input);

        tokio::select! {
            _ = cancel.cancelled() => Err(EngineError::Cancelled),
            result = with_retry(self.retry, || self.provider.generate(&prompt)) => result,
        }
    }

    /// Execute the full pipeline.
    ///
    /// On success the trace holds one outcome per step, in invocation order.
    /// On any step failure the remaining steps are skipped and the result
    /// carries the completed prefix plus the failure reason; the failing
    /// step never contributes a partial outcome.
    pub async fn execute(
        &self,
        steps: &[StepKind],
        initial_input: &str,
        cancel: &CancellationToken,
    ) -> ExecutionResult {
        let mut outcomes: Vec<StepOutcome> = Vec::with_capacity(steps.len());
        let mut current_input = initial_input.to_string();

        for (index, step) in steps.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(step = %step, "Run cancelled before step started");
                return ExecutionResult::failed(outcomes, EngineError::Cancelled.to_string());
            }

            info!(
                step = %step,
                index = index + 1,
                total = steps.len(),
                "Processing step"
            );

            match self.run_step(*step, &current_input, cancel).await {
                Ok(output) => {
                    current_input = output.clone();
                    outcomes.push(StepOutcome::new(*step, output));
                }
                Err(e) => {
                    warn!(step = %step, error = %e, "Step failed, halting run");
                    return ExecutionResult::failed(outcomes, e.to_string());
                }
            }

            // Fixed pacing floor between provider calls, additive to any
            // backoff the next step may incur. Not needed after the last.
            if index + 1 < steps.len() {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        return ExecutionResult::failed(
                            outcomes,
                            EngineError::Cancelled.to_string(),
                        );
                    }
                    _ = tokio::time::sleep(self.step_delay) => {}
                }
            }
        }

        ExecutionResult::completed(outcomes)
    }
}
