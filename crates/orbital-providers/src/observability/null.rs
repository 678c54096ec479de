//! Null operation observer for testing

use orbital_domain::ports::OperationObserver;
use orbital_domain::value_objects::OperationStatistics;

/// Observer that drops every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOperationObserver;

impl NullOperationObserver {
    /// Create a new null observer
    pub fn new() -> Self {
        Self
    }
}

impl OperationObserver for NullOperationObserver {
    fn record(&self, _statistics: &OperationStatistics) {}
}
