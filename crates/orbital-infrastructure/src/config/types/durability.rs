//! Durability (retry + circuit breaker) configuration types

use crate::constants::{
    CIRCUIT_BREAKER_DEFAULT_FAILURE_RATIO, CIRCUIT_BREAKER_DEFAULT_MINIMUM_THROUGHPUT,
    CIRCUIT_BREAKER_DEFAULT_SAMPLING_DURATION, CIRCUIT_BREAKER_MAX_BREAK_DURATION,
    RETRY_DEFAULT_DELAY, RETRY_DEFAULT_MAX_ATTEMPTS, RETRY_DEFAULT_MAX_DELAY,
};
use crate::resilience::{
    BackoffType, CircuitBreakerOptions, ResiliencePipeline, RetryOptions, exponential_break_duration,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Durability configuration
///
/// Pipelines are only registered when `use_custom_retry_policies` is set.
/// `entity_policies` is keyed by entity type name and takes precedence over
/// `default_policy`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DurabilityConfig {
    /// Wrap repositories in durable decorators
    pub use_custom_retry_policies: bool,

    /// Pipeline registered under the default policy name
    pub default_policy: PolicyConfig,

    /// Pipelines registered under an entity type name
    pub entity_policies: HashMap<String, PolicyConfig>,
}

/// One resilience pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Retry stage
    pub retry: RetryConfig,

    /// Circuit-breaker stage; omitted means retry only
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            circuit_breaker: Some(CircuitBreakerConfig::default()),
        }
    }
}

impl PolicyConfig {
    /// Build a pipeline named `name` from this configuration
    pub fn build_pipeline(&self, name: &str) -> ResiliencePipeline {
        let builder = ResiliencePipeline::builder(name).add_retry(self.retry.to_options());
        match &self.circuit_breaker {
            Some(breaker) => builder.add_circuit_breaker(breaker.to_options()),
            None => builder,
        }
        .build()
    }
}

/// Retry stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retry_attempts: u32,

    /// Base delay between attempts in milliseconds
    pub delay_ms: u64,

    /// How the delay grows with each attempt
    pub backoff: BackoffType,

    /// Upper bound for one delay in milliseconds
    pub max_delay_ms: Option<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retry_attempts: RETRY_DEFAULT_MAX_ATTEMPTS,
            delay_ms: duration_ms(RETRY_DEFAULT_DELAY),
            backoff: BackoffType::Exponential,
            max_delay_ms: Some(duration_ms(RETRY_DEFAULT_MAX_DELAY)),
        }
    }
}

impl RetryConfig {
    /// Retry options with the default transient-error predicate
    pub fn to_options(&self) -> RetryOptions {
        RetryOptions::default()
            .with_max_retry_attempts(self.max_retry_attempts)
            .with_delay(Duration::from_millis(self.delay_ms))
            .with_backoff(self.backoff)
            .with_max_delay(self.max_delay_ms.map(Duration::from_millis))
    }
}

/// Circuit-breaker stage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitBreakerConfig {
    /// Failure ratio in `[0, 1]` at which the breaker opens
    pub failure_ratio: f64,

    /// Calls required in the sampling window before the ratio counts
    pub minimum_throughput: u32,

    /// Sampling window length in seconds
    pub sampling_duration_secs: u64,

    /// Cap on the exponential break duration in seconds
    pub max_break_duration_secs: u64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_ratio: CIRCUIT_BREAKER_DEFAULT_FAILURE_RATIO,
            minimum_throughput: CIRCUIT_BREAKER_DEFAULT_MINIMUM_THROUGHPUT,
            sampling_duration_secs: CIRCUIT_BREAKER_DEFAULT_SAMPLING_DURATION.as_secs(),
            max_break_duration_secs: CIRCUIT_BREAKER_MAX_BREAK_DURATION.as_secs(),
        }
    }
}

impl CircuitBreakerConfig {
    /// Breaker options with the default transient-error predicate
    pub fn to_options(&self) -> CircuitBreakerOptions {
        let cap = Duration::from_secs(self.max_break_duration_secs);
        CircuitBreakerOptions::default()
            .with_failure_ratio(self.failure_ratio)
            .with_minimum_throughput(self.minimum_throughput)
            .with_sampling_duration(Duration::from_secs(self.sampling_duration_secs))
            .with_break_duration_generator(move |failures| {
                exponential_break_duration(failures, cap)
            })
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
