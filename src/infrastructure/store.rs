//! In-memory definition store and run sinks

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::domain::{DefinitionStore, EngineError, RunRecord, RunSink, WorkflowDefinition, WorkflowId};

/// In-memory workflow definition store
#[derive(Debug, Default)]
pub struct InMemoryDefinitionStore {
    definitions: RwLock<HashMap<WorkflowId, WorkflowDefinition>>,
}

impl InMemoryDefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definitions(definitions: Vec<WorkflowDefinition>) -> Self {
        let map = definitions
            .into_iter()
            .map(|d| (d.id().clone(), d))
            .collect();

        Self {
            definitions: RwLock::new(map),
        }
    }

    pub fn insert(&self, definition: WorkflowDefinition) -> Result<(), EngineError> {
        let mut definitions = self.definitions.write().map_err(|e| {
            EngineError::storage(format!("Failed to acquire write lock: {}", e))
        })?;

        definitions.insert(definition.id().clone(), definition);
        Ok(())
    }
}

#[async_trait]
impl DefinitionStore for InMemoryDefinitionStore {
    async fn get(&self, id: &WorkflowId) -> Result<Option<WorkflowDefinition>, EngineError> {
        let definitions = self.definitions.read().map_err(|e| {
            EngineError::storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(definitions.get(id).cloned())
    }
}

/// In-memory run sink, mainly for tests and local development
#[derive(Debug, Default)]
pub struct InMemoryRunSink {
    records: Mutex<Vec<RunRecord>>,
}

impl InMemoryRunSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<RunRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl RunSink for InMemoryRunSink {
    async fn record(&self, record: &RunRecord) -> Result<(), EngineError> {
        let mut records = self.records.lock().map_err(|e| {
            EngineError::storage(format!("Failed to acquire lock: {}", e))
        })?;

        records.push(record.clone());
        Ok(())
    }
}

/// Run sink appending one JSON line per run to a file
#[derive(Debug)]
pub struct JsonlRunSink {
    path: PathBuf,
}

impl JsonlRunSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RunSink for JsonlRunSink {
    async fn record(&self, record: &RunRecord) -> Result<(), EngineError> {
        let mut line = serde_json::to_string(record)
            .map_err(|e| EngineError::storage(format!("Failed to serialize run: {e}")))?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                EngineError::storage(format!("Failed to open {}: {e}", self.path.display()))
            })?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| EngineError::storage(format!("Failed to write run: {e}")))?;

        Ok(())
    }
}
