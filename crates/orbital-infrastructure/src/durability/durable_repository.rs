//! Durable single-item repository

use super::policy_provider::{DurabilityPolicyProvider, resolve_policy};
use crate::resilience::ResiliencePipeline;
use async_trait::async_trait;
use orbital_domain::entities::Entity;
use orbital_domain::error::Result;
use orbital_domain::repositories::Repository;
use orbital_domain::value_objects::PartitionKey;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// [`Repository`] decorator running every call through a resilience pipeline
pub struct DurableRepository<E: Entity> {
    inner: Arc<dyn Repository<E>>,
    pipeline: Arc<ResiliencePipeline>,
}

impl<E: Entity> DurableRepository<E> {
    /// Wrap `inner` with the pipeline `provider` resolves for `E`
    pub fn new(inner: Arc<dyn Repository<E>>, provider: &dyn DurabilityPolicyProvider) -> Self {
        Self::with_pipeline(inner, resolve_policy::<E>(provider))
    }

    /// Wrap `inner` with an explicit pipeline
    pub fn with_pipeline(inner: Arc<dyn Repository<E>>, pipeline: Arc<ResiliencePipeline>) -> Self {
        Self { inner, pipeline }
    }

    /// Pipeline every call goes through
    pub fn pipeline(&self) -> &ResiliencePipeline {
        &self.pipeline
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for DurableRepository<E> {
    async fn create(
        &self,
        entity: &E,
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<Option<E>> {
        let inner = &*self.inner;
        self.pipeline
            .execute(cancel, move || inner.create(entity, partition_key, cancel))
            .await
    }

    async fn get(
        &self,
        id: &str,
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<Option<E>> {
        let inner = &*self.inner;
        self.pipeline
            .execute(cancel, move || inner.get(id, partition_key, cancel))
            .await
    }

    async fn upsert(
        &self,
        entity: &E,
        partition_key: &PartitionKey,
        etag: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<E>> {
        let inner = &*self.inner;
        self.pipeline
            .execute(cancel, move || inner.upsert(entity, partition_key, etag, cancel))
            .await
    }

    async fn delete(
        &self,
        id: &str,
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        let inner = &*self.inner;
        self.pipeline
            .execute(cancel, move || inner.delete(id, partition_key, cancel))
            .await
    }
}
