//! Resilience pipelines
//!
//! A [`ResiliencePipeline`] wraps an async operation in an optional retry
//! stage (outer) and an optional circuit-breaker stage (inner), so every
//! retry attempt is admitted or rejected by the breaker.
//!
//! | Type | Role |
//! |------|------|
//! | [`RetryOptions`] | Attempts, delay, backoff and which errors to retry |
//! | [`CircuitBreaker`] | Closed / Open / Half-Open state machine shared by every call |
//! | [`ResiliencePipeline`] | Named composition of the two stages |
//! | [`ResiliencePipelineRegistry`] | Pipelines registered at start-up and looked up by name |

pub mod circuit_breaker;
pub mod pipeline;
pub mod registry;
pub mod retry;

use orbital_domain::error::Error;
use std::sync::Arc;

/// Decides whether a stage handles an error
pub type ErrorPredicate = Arc<dyn Fn(&Error) -> bool + Send + Sync>;

/// Default predicate: throttling and timeouts
pub fn transient_errors() -> ErrorPredicate {
    Arc::new(Error::is_transient)
}

pub use circuit_breaker::{
    BreakDurationGenerator, CircuitBreaker, CircuitBreakerOptions, CircuitBreakerState,
    default_break_duration, exponential_break_duration,
};
pub use pipeline::{ResiliencePipeline, ResiliencePipelineBuilder};
pub use registry::ResiliencePipelineRegistry;
pub use retry::{BackoffType, RetryOptions};
