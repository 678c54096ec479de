//! Provider-specific constants

/// Synthetic cost charged by the in-memory store for a point read
pub const IN_MEMORY_READ_CHARGE: f64 = 1.0;

/// Synthetic cost charged by the in-memory store for a create or upsert
pub const IN_MEMORY_WRITE_CHARGE: f64 = 5.0;

/// Synthetic cost charged by the in-memory store for a delete
pub const IN_MEMORY_DELETE_CHARGE: f64 = 5.0;

/// Status code reported when a store call ended without a response
pub const NO_RESPONSE_STATUS_CODE: u16 = 0;

/// Operation names reported to observers
pub mod operations {
    /// Single-item create
    pub const CREATE: &str = "create";
    /// Single-item read
    pub const GET: &str = "get";
    /// Single-item upsert
    pub const UPSERT: &str = "upsert";
    /// Single-item delete
    pub const DELETE: &str = "delete";
    /// Batched partition read
    pub const READ_PARTITION: &str = "read_partition";
    /// Bulk create
    pub const BULK_CREATE: &str = "bulk_create";
    /// Bulk upsert
    pub const BULK_UPSERT: &str = "bulk_upsert";
    /// Bulk delete
    pub const BULK_DELETE: &str = "bulk_delete";
}
