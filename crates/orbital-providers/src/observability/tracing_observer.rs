//! Tracing-backed operation observer
//!
//! Default observer: every store call becomes an `info` event on the
//! `orbital::statistics` target with the statistics as structured fields.

use orbital_domain::ports::OperationObserver;
use orbital_domain::value_objects::OperationStatistics;
use tracing::info;

/// Observer that logs statistics through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOperationObserver;

impl TracingOperationObserver {
    /// Create a new tracing observer
    pub fn new() -> Self {
        Self
    }
}

impl OperationObserver for TracingOperationObserver {
    fn record(&self, statistics: &OperationStatistics) {
        info!(
            target: "orbital::statistics",
            operation = statistics.operation,
            entity_type = statistics.entity_type,
            partition_key = %statistics.partition_key,
            status = %statistics.status,
            elapsed_ms = statistics.elapsed_ms,
            request_charge = statistics.request_charge,
            retries = statistics.failed_request_count,
            "{}: {} {} returned {} in {}ms",
            statistics.operation,
            statistics.entity_type,
            statistics.partition_key,
            statistics.status,
            statistics.elapsed_ms
        );
    }
}
