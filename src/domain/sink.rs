//! Persistence sink seam for run records

use async_trait::async_trait;

use super::error::EngineError;
use super::run::RunRecord;

/// Write-side seam to wherever run records are stored durably.
///
/// The engine hands over exactly one complete record per run, after the run
/// has terminated; there are no incremental writes.
#[async_trait]
pub trait RunSink: Send + Sync + std::fmt::Debug {
    /// Persist one terminated run
    async fn record(&self, record: &RunRecord) -> Result<(), EngineError>;
}
