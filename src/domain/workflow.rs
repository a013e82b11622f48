//! Workflow definitions and the definition store seam

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::step::StepKind;

/// Shortest and longest step sequences a workflow may define
pub const MIN_STEPS: usize = 2;
pub const MAX_STEPS: usize = 4;

/// Workflow identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkflowId(String);

impl WorkflowId {
    /// Create a new WorkflowId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, EngineError> {
        let id = id.into();

        if id.is_empty() || id.len() > 64 {
            return Err(EngineError::invalid_input(
                "workflow id must be 1-64 characters",
            ));
        }

        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(EngineError::invalid_input(
                "workflow id may only contain alphanumerics, '-' and '_'",
            ));
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WorkflowId {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WorkflowId> for String {
    fn from(id: WorkflowId) -> Self {
        id.0
    }
}

impl std::fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered pipeline of named transformation steps.
///
/// The step sequence must hold 2-4 kinds with no kind repeated; the engine
/// assumes definitions coming out of a store already satisfy this, and
/// construction enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    id: WorkflowId,
    name: String,
    steps: Vec<StepKind>,
}

impl WorkflowDefinition {
    /// Create a definition, validating the step sequence
    pub fn new(
        id: WorkflowId,
        name: impl Into<String>,
        steps: Vec<StepKind>,
    ) -> Result<Self, EngineError> {
        validate_steps(&steps)?;

        Ok(Self {
            id,
            name: name.into(),
            steps,
        })
    }

    pub fn id(&self) -> &WorkflowId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[StepKind] {
        &self.steps
    }
}

/// Check a step sequence is 2-4 kinds long with all kinds distinct
pub fn validate_steps(steps: &[StepKind]) -> Result<(), EngineError> {
    if steps.len() < MIN_STEPS || steps.len() > MAX_STEPS {
        return Err(EngineError::invalid_input(format!(
            "workflow must have {MIN_STEPS}-{MAX_STEPS} steps, got {}",
            steps.len()
        )));
    }

    for (i, step) in steps.iter().enumerate() {
        if steps[..i].contains(step) {
            return Err(EngineError::invalid_input(format!(
                "duplicate step kind: {step}"
            )));
        }
    }

    Ok(())
}

/// Read-side seam to wherever workflow definitions live
#[async_trait]
pub trait DefinitionStore: Send + Sync + std::fmt::Debug {
    /// Fetch a definition by id, or `None` when it does not exist
    async fn get(&self, id: &WorkflowId) -> Result<Option<WorkflowDefinition>, EngineError>;
}
