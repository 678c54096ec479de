//! Single-item Repository Interface

use crate::entities::Entity;
use crate::error::Result;
use crate::value_objects::PartitionKey;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Repository: single-item CRUD against one container
///
/// Absence, duplicate ids and stale etags are expected outcomes and come back
/// as `None`/`false`. Any other failure is returned as `Err`.
///
/// # Example
///
/// ```ignore
/// let created = repo.create(&item, &pk, &cancel).await?;   // None on conflict
/// let current = repo.get(item.id(), &pk, &cancel).await?;  // None when absent
///
/// // Optimistic concurrency: None when someone else wrote first
/// let updated = repo.upsert(&edited, &pk, current.etag(), &cancel).await?;
/// ```
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Write a new document
    ///
    /// # Returns
    /// The stored entity (with its etag), or `None` when the id already
    /// exists in the partition
    async fn create(
        &self,
        entity: &E,
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<Option<E>>;

    /// Read a document by id, `None` when absent
    async fn get(
        &self,
        id: &str,
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<Option<E>>;

    /// Insert or replace a document
    ///
    /// # Arguments
    /// - `etag`: when supplied, the write only applies if it matches the
    ///   stored version
    ///
    /// # Returns
    /// The stored entity, or `None` when the document is missing or the etag
    /// is stale
    async fn upsert(
        &self,
        entity: &E,
        partition_key: &PartitionKey,
        etag: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<E>>;

    /// Remove a document; `false` when it did not exist
    async fn delete(
        &self,
        id: &str,
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<bool>;
}
