//! Value objects
//!
//! Immutable data shapes that flow through the repositories.

/// Bulk operation outcome types
pub mod bulk;
/// Partition key
pub mod partition_key;
/// Per-operation statistics reported to observers
pub mod statistics;

pub use bulk::{BulkOperationError, BulkOperationResult};
pub use partition_key::{PartitionKey, PartitionKeyBuilder};
pub use statistics::OperationStatistics;
