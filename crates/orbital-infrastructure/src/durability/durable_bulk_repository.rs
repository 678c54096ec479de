//! Durable bulk repository
//!
//! Each bulk call is one pipeline execution: a transient failure that
//! escapes the inner call (e.g. from `read_partition`) retries the whole
//! call. Per-item failures are already captured in the result by the inner
//! repository and are returned as-is.

use super::policy_provider::{DurabilityPolicyProvider, resolve_policy};
use crate::resilience::ResiliencePipeline;
use async_trait::async_trait;
use orbital_domain::entities::Entity;
use orbital_domain::error::Result;
use orbital_domain::repositories::BulkRepository;
use orbital_domain::value_objects::{BulkOperationResult, PartitionKey};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// [`BulkRepository`] decorator running every call through a resilience pipeline
pub struct DurableBulkRepository<E: Entity> {
    inner: Arc<dyn BulkRepository<E>>,
    pipeline: Arc<ResiliencePipeline>,
}

impl<E: Entity> DurableBulkRepository<E> {
    /// Wrap `inner` with the pipeline `provider` resolves for `E`
    pub fn new(inner: Arc<dyn BulkRepository<E>>, provider: &dyn DurabilityPolicyProvider) -> Self {
        Self::with_pipeline(inner, resolve_policy::<E>(provider))
    }

    /// Wrap `inner` with an explicit pipeline
    pub fn with_pipeline(
        inner: Arc<dyn BulkRepository<E>>,
        pipeline: Arc<ResiliencePipeline>,
    ) -> Self {
        Self { inner, pipeline }
    }

    /// Pipeline every call goes through
    pub fn pipeline(&self) -> &ResiliencePipeline {
        &self.pipeline
    }
}

#[async_trait]
impl<E: Entity> BulkRepository<E> for DurableBulkRepository<E> {
    async fn read_partition(
        &self,
        ids: &[String],
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<Vec<E>> {
        let inner = &*self.inner;
        self.pipeline
            .execute(cancel, move || inner.read_partition(ids, partition_key, cancel))
            .await
    }

    async fn bulk_create(
        &self,
        entities: &[E],
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<BulkOperationResult<E>> {
        let inner = &*self.inner;
        self.pipeline
            .execute(cancel, move || inner.bulk_create(entities, partition_key, cancel))
            .await
    }

    async fn bulk_upsert(
        &self,
        entities: &[E],
        partition_key: &PartitionKey,
        enforce_etag: bool,
        cancel: &CancellationToken,
    ) -> Result<BulkOperationResult<E>> {
        let inner = &*self.inner;
        self.pipeline
            .execute(cancel, move || {
                inner.bulk_upsert(entities, partition_key, enforce_etag, cancel)
            })
            .await
    }

    async fn bulk_delete(
        &self,
        ids: &[String],
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<BulkOperationResult<String>> {
        let inner = &*self.inner;
        self.pipeline
            .execute(cancel, move || inner.bulk_delete(ids, partition_key, cancel))
            .await
    }
}
