//! Circuit breaker
//!
//! Tracks handled failures over a fixed sampling window. When the window
//! has seen at least `minimum_throughput` calls and the failure ratio
//! reaches `failure_ratio`, the breaker opens and rejects calls for a break
//! duration derived from the consecutive failure count. After the break the
//! next call is admitted as a single probe: success closes the breaker,
//! failure opens it again for a longer break.

use super::{ErrorPredicate, transient_errors};
use crate::constants::{
    CIRCUIT_BREAKER_DEFAULT_FAILURE_RATIO, CIRCUIT_BREAKER_DEFAULT_MINIMUM_THROUGHPUT,
    CIRCUIT_BREAKER_DEFAULT_SAMPLING_DURATION, CIRCUIT_BREAKER_MAX_BREAK_DURATION,
};
use orbital_domain::error::{Error, Result};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Computes the break duration from the consecutive failure count
pub type BreakDurationGenerator = Arc<dyn Fn(u32) -> Duration + Send + Sync>;

/// `min(cap, 2^failures seconds)`
pub fn exponential_break_duration(failures: u32, cap: Duration) -> Duration {
    let seconds = 1u64.checked_shl(failures).unwrap_or(u64::MAX);
    Duration::from_secs(seconds).min(cap)
}

/// `min(60s, 2^failures seconds)`
pub fn default_break_duration(failures: u32) -> Duration {
    exponential_break_duration(failures, CIRCUIT_BREAKER_MAX_BREAK_DURATION)
}

/// Circuit breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitBreakerState {
    /// Calls pass through
    Closed,
    /// Calls are rejected until the break elapses
    Open,
    /// One probe call decides between Closed and Open
    HalfOpen,
}

impl fmt::Display for CircuitBreakerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
            Self::HalfOpen => write!(f, "half-open"),
        }
    }
}

/// Circuit breaker configuration
#[derive(Clone)]
pub struct CircuitBreakerOptions {
    /// Failure ratio in `[0, 1]` that opens the breaker
    pub failure_ratio: f64,
    /// Calls required in the window before the ratio is considered
    pub minimum_throughput: u32,
    /// Length of the sampling window
    pub sampling_duration: Duration,
    /// Break duration for a given consecutive failure count
    pub break_duration_generator: BreakDurationGenerator,
    /// Errors counted as failures; everything else counts as success
    pub should_handle: ErrorPredicate,
}

impl Default for CircuitBreakerOptions {
    fn default() -> Self {
        Self {
            failure_ratio: CIRCUIT_BREAKER_DEFAULT_FAILURE_RATIO,
            minimum_throughput: CIRCUIT_BREAKER_DEFAULT_MINIMUM_THROUGHPUT,
            sampling_duration: CIRCUIT_BREAKER_DEFAULT_SAMPLING_DURATION,
            break_duration_generator: Arc::new(default_break_duration),
            should_handle: transient_errors(),
        }
    }
}

impl fmt::Debug for CircuitBreakerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitBreakerOptions")
            .field("failure_ratio", &self.failure_ratio)
            .field("minimum_throughput", &self.minimum_throughput)
            .field("sampling_duration", &self.sampling_duration)
            .finish_non_exhaustive()
    }
}

impl CircuitBreakerOptions {
    /// Set the failure ratio
    #[must_use]
    pub fn with_failure_ratio(mut self, ratio: f64) -> Self {
        self.failure_ratio = ratio;
        self
    }

    /// Set the minimum throughput
    #[must_use]
    pub fn with_minimum_throughput(mut self, calls: u32) -> Self {
        self.minimum_throughput = calls;
        self
    }

    /// Set the sampling window length
    #[must_use]
    pub fn with_sampling_duration(mut self, duration: Duration) -> Self {
        self.sampling_duration = duration;
        self
    }

    /// Replace the break duration generator
    #[must_use]
    pub fn with_break_duration_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        self.break_duration_generator = Arc::new(generator);
        self
    }

    /// Use the same break duration regardless of the failure count
    #[must_use]
    pub fn with_break_duration(self, duration: Duration) -> Self {
        self.with_break_duration_generator(move |_| duration)
    }

    /// Replace the failure predicate
    #[must_use]
    pub fn handle<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Error) -> bool + Send + Sync + 'static,
    {
        self.should_handle = Arc::new(predicate);
        self
    }
}

struct BreakerInner {
    state: CircuitBreakerState,
    window_started: Instant,
    window_calls: u32,
    window_failures: u32,
    consecutive_failures: u32,
    open_until: Option<Instant>,
    probe_in_flight: bool,
}

impl BreakerInner {
    fn roll_window(&mut self, now: Instant, sampling: Duration) {
        if now.duration_since(self.window_started) >= sampling {
            self.window_started = now;
            self.window_calls = 0;
            self.window_failures = 0;
        }
    }
}

/// In-memory circuit breaker
///
/// State lives behind a mutex that is never held across an await point, so
/// one breaker can be shared by any number of concurrent callers.
pub struct CircuitBreaker {
    name: String,
    options: CircuitBreakerOptions,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    /// Create a closed breaker
    pub fn new(name: impl Into<String>, options: CircuitBreakerOptions) -> Self {
        Self {
            name: name.into(),
            options,
            inner: Mutex::new(BreakerInner {
                state: CircuitBreakerState::Closed,
                window_started: Instant::now(),
                window_calls: 0,
                window_failures: 0,
                consecutive_failures: 0,
                open_until: None,
                probe_in_flight: false,
            }),
        }
    }

    /// Breaker name, used in logs and rejections
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current state
    ///
    /// An open breaker whose break has elapsed still reports `Open` until
    /// the next call turns it half-open.
    pub fn state(&self) -> CircuitBreakerState {
        self.lock().state
    }

    /// Handled failures since the last success
    pub fn consecutive_failures(&self) -> u32 {
        self.lock().consecutive_failures
    }

    /// Run `operation` if the breaker admits it and record the outcome
    ///
    /// Rejected calls return [`Error::CircuitOpen`] without invoking the
    /// operation.
    pub async fn execute<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let permit = self.acquire()?;
        let result = operation().await;
        match &result {
            Err(err) if (self.options.should_handle)(err) => permit.failure(),
            _ => permit.success(),
        }
        result
    }

    fn lock(&self) -> MutexGuard<'_, BreakerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn acquire(&self) -> Result<Permit<'_>> {
        let mut inner = self.lock();
        let now = Instant::now();
        match inner.state {
            CircuitBreakerState::Closed => Ok(Permit::new(self, false)),
            CircuitBreakerState::Open => match inner.open_until {
                Some(until) if now < until => Err(self.rejection(until - now)),
                _ => {
                    self.transition(&mut inner, CircuitBreakerState::HalfOpen);
                    inner.probe_in_flight = true;
                    Ok(Permit::new(self, true))
                }
            },
            CircuitBreakerState::HalfOpen if inner.probe_in_flight => {
                Err(self.rejection(Duration::ZERO))
            }
            CircuitBreakerState::HalfOpen => {
                inner.probe_in_flight = true;
                Ok(Permit::new(self, true))
            }
        }
    }

    fn rejection(&self, retry_after: Duration) -> Error {
        Error::CircuitOpen {
            pipeline: self.name.clone(),
            retry_after,
        }
    }

    fn on_success(&self, probe: bool) {
        let mut inner = self.lock();
        if probe {
            inner.consecutive_failures = 0;
            inner.probe_in_flight = false;
            self.transition(&mut inner, CircuitBreakerState::Closed);
            return;
        }
        // A call admitted before the breaker opened must not reset the count
        if inner.state == CircuitBreakerState::Closed {
            inner.consecutive_failures = 0;
            let now = Instant::now();
            inner.roll_window(now, self.options.sampling_duration);
            inner.window_calls += 1;
        }
    }

    fn on_failure(&self, probe: bool) {
        let mut inner = self.lock();
        inner.consecutive_failures = inner.consecutive_failures.saturating_add(1);
        if probe {
            inner.probe_in_flight = false;
            self.open(&mut inner);
            return;
        }
        if inner.state != CircuitBreakerState::Closed {
            return;
        }

        let now = Instant::now();
        inner.roll_window(now, self.options.sampling_duration);
        inner.window_calls += 1;
        inner.window_failures += 1;

        if inner.window_calls >= self.options.minimum_throughput {
            let ratio = f64::from(inner.window_failures) / f64::from(inner.window_calls);
            if ratio >= self.options.failure_ratio {
                self.open(&mut inner);
            }
        }
    }

    fn on_abandoned_probe(&self) {
        let mut inner = self.lock();
        inner.probe_in_flight = false;
    }

    fn open(&self, inner: &mut BreakerInner) {
        let break_duration = (self.options.break_duration_generator)(inner.consecutive_failures);
        let now = Instant::now();
        inner.open_until = Some(
            now.checked_add(break_duration)
                .unwrap_or_else(|| now + CIRCUIT_BREAKER_MAX_BREAK_DURATION),
        );
        tracing::warn!(
            circuit_breaker = %self.name,
            consecutive_failures = inner.consecutive_failures,
            break_ms = u64::try_from(break_duration.as_millis()).unwrap_or(u64::MAX),
            "Circuit breaker opened"
        );
        self.transition(inner, CircuitBreakerState::Open);
    }

    fn transition(&self, inner: &mut BreakerInner, new_state: CircuitBreakerState) {
        let old_state = inner.state;
        if old_state == new_state {
            return;
        }
        tracing::info!(
            circuit_breaker = %self.name,
            from = %old_state,
            to = %new_state,
            "Circuit breaker state transition"
        );
        inner.state = new_state;

        if new_state == CircuitBreakerState::Closed {
            inner.open_until = None;
            inner.window_started = Instant::now();
            inner.window_calls = 0;
            inner.window_failures = 0;
        }
    }
}

impl fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("name", &self.name)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Admission for one call
///
/// A probe dropped before reporting (e.g. its future was cancelled) frees
/// the half-open slot without changing state.
struct Permit<'a> {
    breaker: &'a CircuitBreaker,
    probe: bool,
    settled: bool,
}

impl<'a> Permit<'a> {
    fn new(breaker: &'a CircuitBreaker, probe: bool) -> Self {
        Self {
            breaker,
            probe,
            settled: false,
        }
    }

    fn success(mut self) {
        self.settled = true;
        self.breaker.on_success(self.probe);
    }

    fn failure(mut self) {
        self.settled = true;
        self.breaker.on_failure(self.probe);
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        if self.probe && !self.settled {
            self.breaker.on_abandoned_probe();
        }
    }
}
