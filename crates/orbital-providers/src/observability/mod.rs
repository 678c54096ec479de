//! Operation Observer Implementations
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`TracingOperationObserver`] | Emits one structured `tracing` event per store call |
//! | [`NullOperationObserver`] | Discards everything |

pub mod null;
pub mod tracing_observer;

pub use null::NullOperationObserver;
pub use tracing_observer::TracingOperationObserver;
