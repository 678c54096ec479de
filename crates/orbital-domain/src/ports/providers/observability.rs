//! Observability Port
//!
//! Every repository call reports its statistics here. Implementations must
//! not block or fail: the core never looks at what happens to a record.

use crate::value_objects::OperationStatistics;

/// Sink for per-operation statistics
pub trait OperationObserver: Send + Sync {
    /// Record one store call
    fn record(&self, statistics: &OperationStatistics);
}
