//! Single-item repository over the document store port

use super::support::{decode, report, unexpected_status};
use crate::constants::operations;
use crate::utils::{TimedOperation, cancellable};
use async_trait::async_trait;
use orbital_domain::entities::Entity;
use orbital_domain::error::Result;
use orbital_domain::ports::{DocumentStore, OperationObserver, StoreStatus};
use orbital_domain::repositories::Repository;
use orbital_domain::value_objects::PartitionKey;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

/// Repository for entities of kind `E` stored in one container
///
/// Holds no mutable state; safe to share across any number of callers.
pub struct DocumentRepository<E> {
    store: Arc<dyn DocumentStore>,
    observer: Arc<dyn OperationObserver>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> DocumentRepository<E> {
    /// Create a repository over `store`, reporting to `observer`
    pub fn new(store: Arc<dyn DocumentStore>, observer: Arc<dyn OperationObserver>) -> Self {
        Self {
            store,
            observer,
            _entity: PhantomData,
        }
    }

    /// Container this repository targets
    pub fn container_name(&self) -> &str {
        self.store.container_name()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for DocumentRepository<E> {
    async fn create(
        &self,
        entity: &E,
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<Option<E>> {
        let timer = TimedOperation::start();
        let item = serde_json::to_value(entity)?;
        let outcome = cancellable(cancel, self.store.create_item(item, partition_key)).await;
        report::<E>(&*self.observer, operations::CREATE, partition_key, &outcome, &timer);
        let response = outcome?;

        match response.status {
            StoreStatus::Success(_) => decode(response).map(Some),
            StoreStatus::Conflict => {
                warn!(entity_id = entity.id(), entity_type = E::TYPE_NAME, "Entity already exists");
                Ok(None)
            }
            status => {
                error!(entity_id = entity.id(), %status, "Failed to create entity");
                Err(unexpected_status::<E>(operations::CREATE, entity.id(), status))
            }
        }
    }

    async fn get(
        &self,
        id: &str,
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<Option<E>> {
        let timer = TimedOperation::start();
        let outcome = cancellable(cancel, self.store.read_item(id, partition_key)).await;
        report::<E>(&*self.observer, operations::GET, partition_key, &outcome, &timer);
        let response = outcome?;

        match response.status {
            StoreStatus::Success(_) => decode(response).map(Some),
            StoreStatus::NotFound => {
                warn!(entity_id = id, entity_type = E::TYPE_NAME, "Unable to find entity");
                Ok(None)
            }
            status => {
                error!(entity_id = id, %status, "Failed to read entity");
                Err(unexpected_status::<E>(operations::GET, id, status))
            }
        }
    }

    async fn upsert(
        &self,
        entity: &E,
        partition_key: &PartitionKey,
        etag: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<E>> {
        let timer = TimedOperation::start();
        let item = serde_json::to_value(entity)?;
        let outcome = cancellable(cancel, self.store.upsert_item(item, partition_key, etag)).await;
        report::<E>(&*self.observer, operations::UPSERT, partition_key, &outcome, &timer);
        let response = outcome?;

        match response.status {
            StoreStatus::Success(_) => decode(response).map(Some),
            StoreStatus::NotFound => {
                warn!(entity_id = entity.id(), entity_type = E::TYPE_NAME, "Entity not found");
                Ok(None)
            }
            StoreStatus::PreconditionFailed => {
                warn!(
                    entity_id = entity.id(),
                    entity_type = E::TYPE_NAME,
                    "Entity has been updated by someone else, reload and retry"
                );
                Ok(None)
            }
            status => {
                error!(entity_id = entity.id(), %status, "Failed to upsert entity");
                Err(unexpected_status::<E>(operations::UPSERT, entity.id(), status))
            }
        }
    }

    async fn delete(
        &self,
        id: &str,
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<bool> {
        let timer = TimedOperation::start();
        let outcome = cancellable(cancel, self.store.delete_item(id, partition_key)).await;
        report::<E>(&*self.observer, operations::DELETE, partition_key, &outcome, &timer);
        let response = outcome?;

        match response.status {
            StoreStatus::Success(_) => Ok(true),
            StoreStatus::NotFound => {
                warn!(entity_id = id, partition_key = %partition_key, "Entity was not found");
                Ok(false)
            }
            status => {
                error!(entity_id = id, %status, "Failed to delete entity");
                Err(unexpected_status::<E>(operations::DELETE, id, status))
            }
        }
    }
}
