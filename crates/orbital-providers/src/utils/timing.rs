//! Timing instrumentation helpers

use std::time::{Duration, Instant};

/// Tracks elapsed time of a store call
///
/// # Example
///
/// ```
/// use orbital_providers::utils::TimedOperation;
///
/// let timer = TimedOperation::start();
/// // Perform operation
/// let _elapsed = timer.elapsed_ms();
/// ```
pub struct TimedOperation {
    start: Instant,
}

impl TimedOperation {
    /// Start a new timed operation
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Get elapsed time as Duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
