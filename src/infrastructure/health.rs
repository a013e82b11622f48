//! Provider health probing

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::config::EngineConfig;
use crate::domain::{EngineError, TextGenerator};

const PROBE_PROMPT: &str = "Hello";

/// Probe status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Healthy,
    Unhealthy,
}

/// Answer to "is the provider currently reachable"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport {
    pub status: ProbeStatus,
    pub message: String,
}

impl ProbeReport {
    fn healthy(message: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Healthy,
            message: message.into(),
        }
    }

    fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Unhealthy,
            message: message.into(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ProbeStatus::Healthy
    }
}

/// Issues one trivial provider call under a hard deadline.
///
/// This path bypasses the retrier entirely: a health check must settle
/// quickly and deterministically, not spend a minute backing off.
pub struct HealthProber {
    provider: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl std::fmt::Debug for HealthProber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthProber")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HealthProber {
    pub fn new(provider: Arc<dyn TextGenerator>, config: &EngineConfig) -> Self {
        Self {
            provider,
            timeout: Duration::from_millis(config.probe_timeout_ms),
        }
    }

    /// Race one `generate` call against the deadline
    pub async fn probe(&self) -> ProbeReport {
        match timeout(self.timeout, self.provider.generate(PROBE_PROMPT)).await {
            Err(_) => ProbeReport::unhealthy(
                EngineError::timeout(self.timeout.as_millis() as u64).to_string(),
            ),
            Ok(Ok(_)) => ProbeReport::healthy("Provider is reachable"),
            Ok(Err(e)) if e.is_transient() => {
                ProbeReport::unhealthy("Provider is currently rate limited or overloaded")
            }
            Ok(Err(e)) => ProbeReport::unhealthy(e.to_string()),
        }
    }
}
