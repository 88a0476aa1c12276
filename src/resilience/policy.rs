//! Retry policy traits and the stock implementations.

use std::sync::Arc;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::error::ClientError;
use crate::resilience::calculate_backoff;

/// Governs repeated execution of a failed selection+execution step.
///
/// `attempt` is the number of attempts already made (1 after the first try).
pub trait RetryPolicy: Send + Sync {
    /// Whether another attempt may be made after `error`.
    fn should_retry(&self, attempt: u32, error: &ClientError) -> bool;

    /// Delay to wait before the next attempt.
    fn backoff_delay(&self, attempt: u32) -> Duration;
}

/// Supplies a policy parameterized by the target service name.
pub trait RetryPolicyFactory: Send + Sync {
    /// Policy for requests addressed to `service`.
    fn policy_for(&self, service: &str) -> Arc<dyn RetryPolicy>;
}

/// Policy that never retries.
///
/// Behaves as "no retries" rather than failing construction when retry is
/// active but no real factory was supplied.
#[derive(Debug, Default)]
pub struct NoRetryPolicy;

impl RetryPolicy for NoRetryPolicy {
    fn should_retry(&self, _attempt: u32, _error: &ClientError) -> bool {
        false
    }

    fn backoff_delay(&self, _attempt: u32) -> Duration {
        Duration::ZERO
    }
}

/// Factory yielding [`NoRetryPolicy`] for every service.
#[derive(Debug, Default)]
pub struct NoRetryPolicyFactory;

impl RetryPolicyFactory for NoRetryPolicyFactory {
    fn policy_for(&self, _service: &str) -> Arc<dyn RetryPolicy> {
        Arc::new(NoRetryPolicy)
    }
}

/// Attempt-capped exponential backoff policy.
#[derive(Debug, Clone)]
pub struct BackoffRetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl BackoffRetryPolicy {
    pub fn new(max_attempts: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
            max_delay_ms,
        }
    }
}

impl RetryPolicy for BackoffRetryPolicy {
    fn should_retry(&self, attempt: u32, error: &ClientError) -> bool {
        attempt < self.max_attempts && error.is_retryable()
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        calculate_backoff(attempt, self.base_delay_ms, self.max_delay_ms)
    }
}

/// Factory building [`BackoffRetryPolicy`] from the retry configuration.
#[derive(Debug, Clone)]
pub struct DefaultRetryPolicyFactory {
    properties: RetryConfig,
}

impl DefaultRetryPolicyFactory {
    pub fn new(properties: RetryConfig) -> Self {
        Self { properties }
    }
}

impl RetryPolicyFactory for DefaultRetryPolicyFactory {
    fn policy_for(&self, _service: &str) -> Arc<dyn RetryPolicy> {
        Arc::new(BackoffRetryPolicy::new(
            self.properties.max_attempts,
            self.properties.base_delay_ms,
            self.properties.max_delay_ms,
        ))
    }
}
