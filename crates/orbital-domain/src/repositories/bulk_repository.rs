//! Bulk Repository Interface

use crate::entities::Entity;
use crate::error::Result;
use crate::value_objects::{BulkOperationResult, PartitionKey};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Repository: concurrent multi-item operations inside one partition
///
/// Bulk writes isolate failures per item: one failing item is reported in
/// [`BulkOperationResult::failed`] and never aborts its siblings, so these
/// methods only return `Err` when the whole call could not run.
#[async_trait]
pub trait BulkRepository<E: Entity>: Send + Sync {
    /// Read the given ids from one partition in a single batched request
    ///
    /// Missing ids are absent from the result. A store failure fails the
    /// whole call.
    async fn read_partition(
        &self,
        ids: &[String],
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<Vec<E>>;

    /// Create every entity concurrently
    async fn bulk_create(
        &self,
        entities: &[E],
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<BulkOperationResult<E>>;

    /// Upsert every entity concurrently
    ///
    /// With `enforce_etag`, each write is conditioned on that entity's own
    /// etag, so a stale item fails on its own.
    async fn bulk_upsert(
        &self,
        entities: &[E],
        partition_key: &PartitionKey,
        enforce_etag: bool,
        cancel: &CancellationToken,
    ) -> Result<BulkOperationResult<E>>;

    /// Delete every id concurrently; `succeeded` holds the deleted ids
    async fn bulk_delete(
        &self,
        ids: &[String],
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<BulkOperationResult<String>>;
}
