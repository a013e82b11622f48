//! Top-level run orchestration

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::engine::PipelineEngine;
use crate::config::EngineConfig;
use crate::domain::{DefinitionStore, EngineError, RunRecord, RunSink, WorkflowId};

/// Resolves a workflow, executes it, and hands the finished record to the
/// sink.
///
/// The sink receives exactly one record per run, after the run has reached a
/// terminal state. Failed runs are recorded the same as completed ones; only
/// rejected requests (unknown workflow, invalid input) produce no record.
pub struct WorkflowRunner {
    definitions: Arc<dyn DefinitionStore>,
    sink: Arc<dyn RunSink>,
    engine: PipelineEngine,
    max_input_chars: usize,
}

impl std::fmt::Debug for WorkflowRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowRunner")
            .field("engine", &self.engine)
            .field("max_input_chars", &self.max_input_chars)
            .finish()
    }
}

impl WorkflowRunner {
    pub fn new(
        definitions: Arc<dyn DefinitionStore>,
        sink: Arc<dyn RunSink>,
        engine: PipelineEngine,
        config: &EngineConfig,
    ) -> Self {
        Self {
            definitions,
            sink,
            engine,
            max_input_chars: config.max_input_chars,
        }
    }

    /// Execute one run of the given workflow over `input`.
    ///
    /// Returns the persisted record. An `Err` here means the run was
    /// rejected or the sink failed; provider failures during execution do
    /// not surface as `Err`, they land in the record's result.
    pub async fn run(
        &self,
        workflow_id: &WorkflowId,
        input: &str,
        cancel: &CancellationToken,
    ) -> Result<RunRecord, EngineError> {
        self.validate_input(input)?;

        let definition = self
            .definitions
            .get(workflow_id)
            .await?
            .ok_or_else(|| EngineError::not_found(format!("workflow '{workflow_id}'")))?;

        info!(
            workflow_id = %workflow_id,
            workflow_name = definition.name(),
            steps = definition.steps().len(),
            "Starting run"
        );

        let result = self.engine.execute(definition.steps(), input, cancel).await;

        let record = RunRecord::new(
            workflow_id.clone(),
            definition.name(),
            input,
            definition.steps().to_vec(),
            result,
        );

        self.sink.record(&record).await?;

        info!(
            run_id = %record.id,
            status = ?record.result.status,
            "Run recorded"
        );

        Ok(record)
    }

    fn validate_input(&self, input: &str) -> Result<(), EngineError> {
        if input.trim().is_empty() {
            return Err(EngineError::invalid_input("input text must be non-empty"));
        }

        let chars = input.chars().count();
        if chars > self.max_input_chars {
            return Err(EngineError::invalid_input(format!(
                "input text exceeds {} characters (got {chars})",
                self.max_input_chars
            )));
        }

        Ok(())
    }
}
