//! Engine error types

use thiserror::Error;

/// Errors produced while executing a pipeline run
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    #[error("Unknown step kind: {0}")]
    UnknownStepKind(String),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Provider returned no completion text")]
    EmptyResponse,

    #[error("Provider rate limited or overloaded (HTTP {status}): {message}")]
    RateLimited { status: u16, message: String },

    #[error("Provider error: {message}")]
    Provider { message: String },

    #[error("Retries exhausted after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },

    #[error("Run cancelled")]
    Cancelled,

    #[error("Provider connection timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl EngineError {
    pub fn unknown_step_kind(kind: impl Into<String>) -> Self {
        Self::UnknownStepKind(kind.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn rate_limited(status: u16, message: impl Into<String>) -> Self {
        Self::RateLimited {
            status,
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    pub fn retries_exhausted(attempts: u32, message: impl Into<String>) -> Self {
        Self::RetriesExhausted {
            attempts,
            message: message.into(),
        }
    }

    pub fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout { timeout_ms }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether the retrier may retry this failure.
    ///
    /// Only rate-limit/overload responses from the provider qualify; every
    /// other failure is permanent and must surface immediately.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
