//! Bulk operation outcome types
//!
//! A bulk call never aborts on a single item: every input ends up either in
//! [`BulkOperationResult::succeeded`] or in [`BulkOperationResult::failed`].

use crate::error::Error;

/// Aggregated outcome of a bulk operation
#[derive(Debug)]
pub struct BulkOperationResult<T> {
    /// Items that completed, in completion order
    pub succeeded: Vec<T>,
    /// Items that failed
    pub failed: Vec<BulkOperationError<T>>,
    /// Sum of the cost charged for successful writes
    pub total_request_units: f64,
}

impl<T> BulkOperationResult<T> {
    /// True when no item failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of items accounted for (succeeded + failed)
    pub fn processed(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Record a successful item and its cost
    pub fn push_success(&mut self, item: T, request_charge: f64) {
        self.succeeded.push(item);
        self.total_request_units += request_charge;
    }

    /// Record a failed item
    pub fn push_failure(&mut self, failure: BulkOperationError<T>) {
        self.failed.push(failure);
    }
}

impl<T> Default for BulkOperationResult<T> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
            total_request_units: 0.0,
        }
    }
}

/// One failed item of a bulk operation
#[derive(Debug)]
pub struct BulkOperationError<T> {
    /// The offending item, when available
    pub item: Option<T>,
    /// Failure that caused it
    pub error: Error,
    /// Human-readable description
    pub message: String,
}

impl<T> BulkOperationError<T> {
    /// Failure for `item`; the message is derived from the error
    pub fn new(item: Option<T>, error: Error) -> Self {
        let message = error.to_string();
        Self {
            item,
            error,
            message,
        }
    }

    /// Override the message
    #[must_use]
    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = message.into();
        self
    }
}
