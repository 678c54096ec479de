//! Shared utilities for provider implementations

/// Cancellation helpers
pub mod cancellation;
/// Timing instrumentation helpers
pub mod timing;

pub use cancellation::cancellable;
pub use timing::TimedOperation;
