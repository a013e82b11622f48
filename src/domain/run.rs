//! Run trace and result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::step::StepKind;
use super::workflow::WorkflowId;

/// Output of one successfully completed step, in execution order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Which step produced this output
    pub step: StepKind,

    /// The provider's transformed text
    pub output: String,

    /// When the step completed
    pub timestamp: DateTime<Utc>,
}

impl StepOutcome {
    pub fn new(step: StepKind, output: impl Into<String>) -> Self {
        Self {
            step,
            output: output.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Terminal status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Completed,
    Failed,
}

/// Result of executing a pipeline.
///
/// When `status` is `Completed`, `outcomes` holds one entry per requested
/// step and `error` is absent. When `Failed`, `outcomes` holds the completed
/// prefix (steps strictly before the failing one) and `error` carries the
/// terminal failure reason. There is never a partial outcome for the failing
/// step itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Per-step outputs in invocation order
    pub outcomes: Vec<StepOutcome>,

    /// Whether every requested step produced an outcome
    pub status: RunStatus,

    /// Terminal failure reason, present only when `status` is `Failed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Create a completed result
    pub fn completed(outcomes: Vec<StepOutcome>) -> Self {
        Self {
            outcomes,
            status: RunStatus::Completed,
            error: None,
        }
    }

    /// Create a failed result carrying the completed prefix
    pub fn failed(outcomes: Vec<StepOutcome>, error: impl Into<String>) -> Self {
        Self {
            outcomes,
            status: RunStatus::Failed,
            error: Some(error.into()),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Output of the last completed step, if any
    pub fn final_output(&self) -> Option<&str> {
        self.outcomes.last().map(|o| o.output.as_str())
    }
}

/// The single record handed to the persistence sink after a run terminates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unique id for this run
    pub id: Uuid,

    /// Workflow the run was executed from
    pub workflow_id: WorkflowId,

    /// Display name of the workflow at execution time
    pub workflow_name: String,

    /// The initial input text
    pub input: String,

    /// The requested step sequence
    pub steps: Vec<StepKind>,

    /// The execution trace and terminal status
    pub result: ExecutionResult,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl RunRecord {
    pub fn new(
        workflow_id: WorkflowId,
        workflow_name: impl Into<String>,
        input: impl Into<String>,
        steps: Vec<StepKind>,
        result: ExecutionResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            workflow_id,
            workflow_name: workflow_name.into(),
            input: input.into(),
            steps,
            result,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_result() {
        let outcomes = vec![
            StepOutcome::new(StepKind::Clean, "hello world"),
            StepOutcome::new(StepKind::Summarize, "Hello world summary."),
        ];

        let result = ExecutionResult::completed(outcomes);

        assert!(result.is_completed());
        assert_eq!(result.outcomes.len(), 2);
        assert!(result.error.is_none());
        assert_eq!(result.final_output(), Some("Hello world summary."));
    }

    #[test]
    fn test_failed_result_keeps_prefix() {
        let prefix = vec![StepOutcome::new(StepKind::Clean, "hello world")];
        let result = ExecutionResult::failed(prefix, "Retries exhausted");

        assert!(!result.is_completed());
        assert_eq!(result.status, RunStatus::Failed);
        assert_eq!(result.outcomes.len(), 1);
        assert_eq!(result.error.as_deref(), Some("Retries exhausted"));
    }

    #[test]
    fn test_failed_result_can_be_empty() {
        let result = ExecutionResult::failed(Vec::new(), "Configuration error");
        assert!(result.outcomes.is_empty());
        assert_eq!(result.final_output(), None);
    }

    #[test]
    fn test_result_serialization() {
        let result = ExecutionResult::completed(vec![StepOutcome::new(StepKind::Tag, "Technology")]);

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"status\":\"completed\""));
        assert!(json.contains("\"step\":\"tag\""));
        assert!(!json.contains("\"error\""));

        let deserialized: ExecutionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, result);
    }

    #[test]
    fn test_run_record() {
        let id = WorkflowId::new("wf-1").unwrap();
        let result = ExecutionResult::completed(vec![StepOutcome::new(StepKind::Clean, "text")]);
        let record = RunRecord::new(
            id.clone(),
            "Cleanup Pipeline",
            "  text ",
            vec![StepKind::Clean],
            result,
        );

        assert_eq!(record.workflow_id, id);
        assert_eq!(record.workflow_name, "Cleanup Pipeline");
        assert_eq!(record.steps, vec![StepKind::Clean]);

        let json = serde_json::to_string(&record).unwrap();
        let back: RunRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
