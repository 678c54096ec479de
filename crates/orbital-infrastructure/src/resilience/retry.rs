//! Retry stage options

use super::{ErrorPredicate, transient_errors};
use crate::constants::{RETRY_DEFAULT_DELAY, RETRY_DEFAULT_MAX_ATTEMPTS};
use orbital_domain::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Growth of the delay between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffType {
    /// Same delay every time
    Constant,
    /// `delay * (attempt + 1)`
    Linear,
    /// `delay * 2^attempt`
    #[default]
    Exponential,
}

/// Retry stage configuration
///
/// `max_retry_attempts` counts retries after the first attempt, so an
/// operation runs at most `max_retry_attempts + 1` times.
#[derive(Clone)]
pub struct RetryOptions {
    /// Retries after the first attempt
    pub max_retry_attempts: u32,
    /// Base delay
    pub delay: Duration,
    /// Delay growth
    pub backoff: BackoffType,
    /// Upper bound for one delay
    pub max_delay: Option<Duration>,
    /// Errors that are retried
    pub should_handle: ErrorPredicate,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_retry_attempts: RETRY_DEFAULT_MAX_ATTEMPTS,
            delay: RETRY_DEFAULT_DELAY,
            backoff: BackoffType::Exponential,
            max_delay: None,
            should_handle: transient_errors(),
        }
    }
}

impl fmt::Debug for RetryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryOptions")
            .field("max_retry_attempts", &self.max_retry_attempts)
            .field("delay", &self.delay)
            .field("backoff", &self.backoff)
            .field("max_delay", &self.max_delay)
            .finish_non_exhaustive()
    }
}

impl RetryOptions {
    /// Set the number of retries
    #[must_use]
    pub fn with_max_retry_attempts(mut self, attempts: u32) -> Self {
        self.max_retry_attempts = attempts;
        self
    }

    /// Set the base delay
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the backoff type
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffType) -> Self {
        self.backoff = backoff;
        self
    }

    /// Set the delay cap
    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Option<Duration>) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Replace the retry predicate
    #[must_use]
    pub fn handle<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Error) -> bool + Send + Sync + 'static,
    {
        self.should_handle = Arc::new(predicate);
        self
    }

    /// Whether `error` is retried by this stage
    pub fn handles(&self, error: &Error) -> bool {
        (self.should_handle)(error)
    }

    /// Delay before retry number `attempt` (zero-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let delay = match self.backoff {
            BackoffType::Constant => self.delay,
            BackoffType::Linear => self.delay.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => {
                // Cap the shift to prevent overflow
                let multiplier = 1u32 << attempt.min(31);
                self.delay.saturating_mul(multiplier)
            }
        };
        self.max_delay.map_or(delay, |max| delay.min(max))
    }
}
