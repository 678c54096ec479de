//! Resilience pipeline composition

use super::circuit_breaker::{CircuitBreaker, CircuitBreakerOptions};
use super::retry::RetryOptions;
use orbital_domain::error::{Error, Result};
use std::fmt;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Name reported by [`ResiliencePipeline::empty`]
const EMPTY_PIPELINE_NAME: &str = "empty";

/// Named retry + circuit-breaker wrapper around async operations
///
/// Retry is the outer stage and the breaker the inner one: each attempt has
/// to be admitted by the breaker, and a breaker rejection is an ordinary
/// failure for the retry stage (not retried by the default predicate).
/// Breaker state is shared by every call made through the same pipeline.
pub struct ResiliencePipeline {
    name: String,
    retry: Option<RetryOptions>,
    circuit_breaker: Option<CircuitBreaker>,
}

impl ResiliencePipeline {
    /// Start building a pipeline called `name`
    pub fn builder(name: impl Into<String>) -> ResiliencePipelineBuilder {
        ResiliencePipelineBuilder::new(name)
    }

    /// Pipeline that runs the operation exactly once
    pub fn empty() -> Self {
        Self {
            name: EMPTY_PIPELINE_NAME.to_string(),
            retry: None,
            circuit_breaker: None,
        }
    }

    /// Pipeline name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when neither stage is configured
    pub fn is_empty(&self) -> bool {
        self.retry.is_none() && self.circuit_breaker.is_none()
    }

    /// Retry stage, if any
    pub fn retry(&self) -> Option<&RetryOptions> {
        self.retry.as_ref()
    }

    /// Breaker stage, if any
    pub fn circuit_breaker(&self) -> Option<&CircuitBreaker> {
        self.circuit_breaker.as_ref()
    }

    /// Run `operation` through the pipeline
    ///
    /// `operation` is invoked once per attempt. Retries happen sequentially;
    /// the wait between attempts ends early with [`Error::Cancelled`] when
    /// `cancel` fires. Without a retry stage the operation's own result is
    /// returned unchanged.
    pub async fn execute<T, F, Fut>(&self, cancel: &CancellationToken, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let Some(retry) = &self.retry else {
            return self.attempt(&mut operation).await;
        };

        let mut attempt = 0;
        loop {
            let error = match self.attempt(&mut operation).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };
            if attempt >= retry.max_retry_attempts || !retry.handles(&error) {
                if attempt > 0 {
                    debug!(pipeline = %self.name, attempts = attempt + 1, error = %error, "Giving up after retries");
                }
                return Err(error);
            }

            let delay = retry.delay_for(attempt);
            attempt += 1;
            warn!(
                pipeline = %self.name,
                attempt,
                max_attempts = retry.max_retry_attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %error,
                "Retrying after transient failure"
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(Error::Cancelled),
                () = tokio::time::sleep(delay) => {}
            }
        }
    }

    async fn attempt<T, F, Fut>(&self, operation: &mut F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match &self.circuit_breaker {
            Some(breaker) => breaker.execute(|| operation()).await,
            None => operation().await,
        }
    }
}

impl fmt::Debug for ResiliencePipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResiliencePipeline")
            .field("name", &self.name)
            .field("retry", &self.retry)
            .field("circuit_breaker", &self.circuit_breaker)
            .finish()
    }
}

/// Builder for [`ResiliencePipeline`]
pub struct ResiliencePipelineBuilder {
    name: String,
    retry: Option<RetryOptions>,
    circuit_breaker: Option<CircuitBreakerOptions>,
}

impl ResiliencePipelineBuilder {
    /// Create a builder with no stages
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            retry: None,
            circuit_breaker: None,
        }
    }

    /// Name the pipeline will carry
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add (or replace) the retry stage
    #[must_use]
    pub fn add_retry(mut self, options: RetryOptions) -> Self {
        self.retry = Some(options);
        self
    }

    /// Add (or replace) the circuit-breaker stage
    #[must_use]
    pub fn add_circuit_breaker(mut self, options: CircuitBreakerOptions) -> Self {
        self.circuit_breaker = Some(options);
        self
    }

    /// Build the pipeline; the breaker starts closed
    pub fn build(self) -> ResiliencePipeline {
        let circuit_breaker = self
            .circuit_breaker
            .map(|options| CircuitBreaker::new(self.name.clone(), options));
        ResiliencePipeline {
            name: self.name,
            retry: self.retry,
            circuit_breaker,
        }
    }
}
