//! Bounded exponential-backoff retry for provider calls

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::domain::EngineError;

/// Retry policy for transient provider failures.
///
/// The delay schedule is deliberately long (4s, 8s, 16s, 32s, ...) because
/// the provider's free-tier quota resets on the order of tens of seconds; a
/// millisecond-scale backoff would just burn attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first call
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 5 }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Sleep before retrying after failed attempt `attempt` (0-based):
    /// `2^(attempt + 2)` seconds.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        Duration::from_millis(2u64.pow(attempt + 2) * 1000)
    }
}

/// Run `call` until it succeeds, retrying transient failures with backoff.
///
/// Permanent failures propagate immediately without sleeping. When every
/// attempt fails transiently, the result is always
/// [`EngineError::RetriesExhausted`], never a fall-through value.
pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut call: F) -> Result<T, EngineError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, EngineError>>,
{
    let mut last_error = EngineError::provider("no attempts made");

    for attempt in 0..policy.max_attempts {
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => {
                last_error = e;

                // No point sleeping after the final attempt.
                if attempt + 1 < policy.max_attempts {
                    let delay = policy.delay_for_attempt(attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = policy.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "Provider rate limited, backing off before retry"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
            Err(e) => return Err(e),
        }
    }

    Err(EngineError::retries_exhausted(
        policy.max_attempts,
        last_error.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use tokio::time::Instant;

    use super::*;

    fn transient() -> EngineError {
        EngineError::rate_limited(429, "quota exceeded")
    }

    #[test]
    fn test_delay_schedule() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(8));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(16));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(32));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_secs(64));
    }

    #[test]
    fn test_policy_floor_of_one_attempt() {
        assert_eq!(RetryPolicy::new(0).max_attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_first_attempt_no_sleep() {
        let start = Instant::now();

        let result = with_retry(RetryPolicy::default(), || async { Ok::<_, EngineError>(42) }).await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_then_success() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result = with_retry(RetryPolicy::default(), || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(transient())
                } else {
                    Ok("recovered".to_string())
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        // Slept 4s + 8s + 16s before the successful fourth attempt.
        assert_eq!(start.elapsed(), Duration::from_secs(28));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_raises_retries_exhausted() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result: Result<(), _> = with_retry(RetryPolicy::default(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(transient()) }
        })
        .await;

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            EngineError::RetriesExhausted { attempts: 5, .. }
        ));
        assert!(!err.is_transient());
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        // 4 + 8 + 16 + 32; no sleep after the final attempt.
        assert_eq!(start.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_failure_propagates_without_sleep() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result: Result<(), _> = with_retry(RetryPolicy::default(), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(EngineError::EmptyResponse) }
        })
        .await;

        assert_eq!(result.unwrap_err(), EngineError::EmptyResponse);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_failure_after_transient_stops_retrying() {
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(RetryPolicy::default(), || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(transient())
                } else {
                    Err(EngineError::configuration("key revoked"))
                }
            }
        })
        .await;

        assert_eq!(
            result.unwrap_err(),
            EngineError::configuration("key revoked")
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
