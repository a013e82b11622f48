//! Domain types for the pipeline engine

pub mod error;
pub mod provider;
pub mod run;
pub mod sink;
pub mod step;
pub mod workflow;

pub use error::EngineError;
pub use provider::TextGenerator;
pub use run::{ExecutionResult, RunRecord, RunStatus, StepOutcome};
pub use sink::RunSink;
pub use step::{build_prompt, StepKind};
pub use workflow::{validate_steps, DefinitionStore, WorkflowDefinition, WorkflowId};
