//! Single bounded backoff-and-retry for transient API failures.

use super::error::ApiError;
use crate::rate_limit::{reset_wait, MAX_WAIT_SECS};
use chrono::Utc;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// How failed requests are retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Backoff unit for transient failures, multiplied by the attempt number.
    pub transient_backoff: Duration,
    /// Longest wait for a rate limit reset.
    pub rate_limit_max_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            transient_backoff: Duration::from_millis(1500),
            rate_limit_max_wait: Duration::from_secs(MAX_WAIT_SECS),
        }
    }
}

impl RetryPolicy {
    /// A policy that retries once without sleeping.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            max_retries: 1,
            transient_backoff: Duration::ZERO,
            rate_limit_max_wait: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt + 1`.
    #[must_use]
    pub fn delay_for(&self, error: &ApiError, attempt: u32) -> Duration {
        match error {
            ApiError::RateLimited {
                reset_at: Some(reset),
                ..
            } => reset_wait(*reset, Utc::now(), self.rate_limit_max_wait),
            ApiError::RateLimited { reset_at: None, .. } => self.rate_limit_max_wait,
            _ => self.transient_backoff * (attempt + 1),
        }
    }
}

/// Runs `call`, retrying retryable failures up to `policy.max_retries` times.
///
/// # Errors
///
/// Returns the last error once retries are exhausted, or the first
/// non-retryable error.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut call: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                let delay = policy.delay_for(&e, attempt);
                warn!(
                    operation,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Request failed, backing off before retry"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient() -> ApiError {
        ApiError::Transient {
            operation: "user".to_string(),
            message: "503".to_string(),
        }
    }

    #[tokio::test]
    async fn retries_transient_failure_once() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result = with_retry(&RetryPolicy::immediate(), "user", move || async move {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(transient())
            } else {
                Ok(7)
            }
        })
        .await;

        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn surfaces_error_after_retry_budget() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<(), _> = with_retry(&RetryPolicy::immediate(), "user", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(transient())
        })
        .await;

        assert_eq!(result, Err(transient()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn does_not_retry_authentication_errors() {
        let calls = AtomicU32::new(0);
        let counter = &calls;
        let result: Result<(), _> = with_retry(&RetryPolicy::immediate(), "user", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Authentication {
                message: "bad credentials".to_string(),
            })
        })
        .await;

        assert!(matches!(result, Err(ApiError::Authentication { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn transient_backoff_grows_with_attempts() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(&transient(), 0), Duration::from_millis(1500));
        assert_eq!(policy.delay_for(&transient(), 1), Duration::from_millis(3000));
    }
}
