//! Operation statistics reported to the observability collaborator

use crate::ports::providers::StoreStatus;
use serde::Serialize;

/// Timing, status and cost of one store call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationStatistics {
    /// Repository operation name (e.g. `create`, `bulk_upsert`)
    pub operation: &'static str,
    /// Entity type name
    pub entity_type: &'static str,
    /// Partition key rendered as a string
    pub partition_key: String,
    /// Status returned by the store
    pub status: StoreStatus,
    /// Client-side elapsed time in milliseconds
    pub elapsed_ms: u64,
    /// Cost units charged, when the store reported them
    pub request_charge: Option<f64>,
    /// Failed sub-requests (store-internal retries)
    pub failed_request_count: u32,
}
