//! Bulk repository over the document store port
//!
//! Every bulk write fans out one store call per item. Outcomes are folded
//! into a single [`BulkOperationResult`] by the stream that drives the
//! fan-out, so no collection is shared between concurrent items.

use super::support::{decode, report, unexpected_status};
use crate::constants::{NO_RESPONSE_STATUS_CODE, operations};
use crate::utils::{TimedOperation, cancellable};
use async_trait::async_trait;
use futures::{StreamExt, future, stream};
use orbital_domain::entities::Entity;
use orbital_domain::error::{Error, Result};
use orbital_domain::ports::{DocumentStore, OperationObserver, StoreResponse, StoreStatus};
use orbital_domain::repositories::BulkRepository;
use orbital_domain::value_objects::{
    BulkOperationError, BulkOperationResult, OperationStatistics, PartitionKey,
};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Per-item outcome: the stored item and its cost, or the captured failure
type ItemOutcome<T> = std::result::Result<(T, f64), BulkOperationError<T>>;

/// Bulk repository for entities of kind `E` stored in one container
///
/// By default every item of a batch is dispatched at once. Use
/// [`with_max_concurrency`](Self::with_max_concurrency) to cap how many
/// per-item calls are in flight.
pub struct DocumentBulkRepository<E> {
    store: Arc<dyn DocumentStore>,
    observer: Arc<dyn OperationObserver>,
    max_concurrency: Option<usize>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> DocumentBulkRepository<E> {
    /// Create an unbounded bulk repository over `store`
    pub fn new(store: Arc<dyn DocumentStore>, observer: Arc<dyn OperationObserver>) -> Self {
        Self {
            store,
            observer,
            max_concurrency: None,
            _entity: PhantomData,
        }
    }

    /// Limit in-flight per-item calls; `None` or `0` means unbounded
    #[must_use]
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit.filter(|n| *n > 0);
        self
    }

    /// Configured concurrency cap
    pub fn max_concurrency(&self) -> Option<usize> {
        self.max_concurrency
    }

    /// Drive `tasks` concurrently and fold their outcomes
    async fn fan_out<T, Fut>(&self, tasks: Vec<Fut>) -> BulkOperationResult<T>
    where
        Fut: Future<Output = ItemOutcome<T>>,
    {
        let limit = self.max_concurrency.unwrap_or(tasks.len()).max(1);
        stream::iter(tasks)
            .buffer_unordered(limit)
            .fold(BulkOperationResult::default(), |mut result, outcome| {
                match outcome {
                    Ok((item, charge)) => result.push_success(item, charge),
                    Err(failure) => result.push_failure(failure),
                }
                future::ready(result)
            })
            .await
    }

    fn observe(
        &self,
        operation: &'static str,
        partition_key: &PartitionKey,
        outcome: &Result<StoreResponse>,
        timer: &TimedOperation,
    ) {
        report::<E>(&*self.observer, operation, partition_key, outcome, timer);
    }

    async fn create_one(
        &self,
        entity: &E,
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> ItemOutcome<E> {
        self.try_create(entity, partition_key, cancel)
            .await
            .map_err(|err| {
                error!(entity_id = entity.id(), error = %err, "An error occurred while creating item");
                BulkOperationError::new(Some(entity.clone()), err)
            })
    }

    async fn try_create(
        &self,
        entity: &E,
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<(E, f64)> {
        let timer = TimedOperation::start();
        let item = serde_json::to_value(entity)?;
        let outcome = cancellable(cancel, self.store.create_item(item, partition_key)).await;
        self.observe(operations::BULK_CREATE, partition_key, &outcome, &timer);
        let response = outcome?;
        settle::<E>(operations::BULK_CREATE, entity.id(), response)
    }

    async fn upsert_one(
        &self,
        entity: &E,
        partition_key: &PartitionKey,
        enforce_etag: bool,
        cancel: &CancellationToken,
    ) -> ItemOutcome<E> {
        self.try_upsert(entity, partition_key, enforce_etag, cancel)
            .await
            .map_err(|err| {
                error!(entity_id = entity.id(), error = %err, "An error occurred while upserting item");
                BulkOperationError::new(Some(entity.clone()), err)
            })
    }

    async fn try_upsert(
        &self,
        entity: &E,
        partition_key: &PartitionKey,
        enforce_etag: bool,
        cancel: &CancellationToken,
    ) -> Result<(E, f64)> {
        let timer = TimedOperation::start();
        let if_match = if enforce_etag { entity.etag() } else { None };
        let item = serde_json::to_value(entity)?;
        let outcome = cancellable(
            cancel,
            self.store.upsert_item(item, partition_key, if_match),
        )
        .await;
        self.observe(operations::BULK_UPSERT, partition_key, &outcome, &timer);
        let response = outcome?;
        settle::<E>(operations::BULK_UPSERT, entity.id(), response)
    }

    async fn delete_one(
        &self,
        id: &str,
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> ItemOutcome<String> {
        self.try_delete(id, partition_key, cancel)
            .await
            .map_err(|err| {
                error!(entity_id = id, error = %err, "An error occurred while deleting item");
                BulkOperationError::new(None, err).with_message(format!("Failed to delete '{id}'"))
            })
    }

    async fn try_delete(
        &self,
        id: &str,
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<(String, f64)> {
        let timer = TimedOperation::start();
        let outcome = cancellable(cancel, self.store.delete_item(id, partition_key)).await;
        self.observe(operations::BULK_DELETE, partition_key, &outcome, &timer);
        let response = outcome?;
        if response.status.is_success() {
            Ok((id.to_string(), response.request_charge))
        } else {
            Err(unexpected_status::<E>(operations::BULK_DELETE, id, response.status))
        }
    }
}

/// Successful responses become the stored entity; anything else is a failure
fn settle<E: Entity>(operation: &'static str, id: &str, response: StoreResponse) -> Result<(E, f64)> {
    if !response.status.is_success() {
        return Err(unexpected_status::<E>(operation, id, response.status));
    }
    let charge = response.request_charge;
    decode(response).map(|entity| (entity, charge))
}

#[async_trait]
impl<E: Entity> BulkRepository<E> for DocumentBulkRepository<E> {
    async fn read_partition(
        &self,
        ids: &[String],
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<Vec<E>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let timer = TimedOperation::start();
        let feed = cancellable(cancel, self.store.read_many_items(ids, partition_key))
            .await
            .inspect_err(|err| {
                error!(error = %err, "An error occurred while reading partition");
                self.observer.record(&OperationStatistics {
                    operation: operations::READ_PARTITION,
                    entity_type: E::TYPE_NAME,
                    partition_key: partition_key.to_string(),
                    status: err
                        .status()
                        .unwrap_or(StoreStatus::Other(NO_RESPONSE_STATUS_CODE)),
                    elapsed_ms: timer.elapsed_ms(),
                    request_charge: None,
                    failed_request_count: 0,
                });
            })?;

        self.observer.record(&OperationStatistics {
            operation: operations::READ_PARTITION,
            entity_type: E::TYPE_NAME,
            partition_key: partition_key.to_string(),
            status: feed.status,
            elapsed_ms: timer.elapsed_ms(),
            request_charge: Some(feed.request_charge),
            failed_request_count: feed.diagnostics.failed_request_count,
        });

        if !feed.status.is_success() {
            error!(status = %feed.status, "An error occurred while reading partition");
            return Err(Error::store(
                feed.status,
                format!("read_partition of {} failed", E::TYPE_NAME),
            ));
        }

        feed.resources
            .into_iter()
            .map(|resource| serde_json::from_value(resource).map_err(Error::from))
            .collect()
    }

    async fn bulk_create(
        &self,
        entities: &[E],
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<BulkOperationResult<E>> {
        let tasks: Vec<_> = entities
            .iter()
            .map(|entity| self.create_one(entity, partition_key, cancel))
            .collect();

        let result = self.fan_out(tasks).await;
        debug!(
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            request_units = result.total_request_units,
            "Bulk create finished"
        );
        Ok(result)
    }

    async fn bulk_upsert(
        &self,
        entities: &[E],
        partition_key: &PartitionKey,
        enforce_etag: bool,
        cancel: &CancellationToken,
    ) -> Result<BulkOperationResult<E>> {
        let tasks: Vec<_> = entities
            .iter()
            .map(|entity| self.upsert_one(entity, partition_key, enforce_etag, cancel))
            .collect();

        let result = self.fan_out(tasks).await;
        debug!(
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            request_units = result.total_request_units,
            "Bulk upsert finished"
        );
        Ok(result)
    }

    async fn bulk_delete(
        &self,
        ids: &[String],
        partition_key: &PartitionKey,
        cancel: &CancellationToken,
    ) -> Result<BulkOperationResult<String>> {
        let tasks: Vec<_> = ids
            .iter()
            .map(|id| self.delete_one(id, partition_key, cancel))
            .collect();

        let result = self.fan_out(tasks).await;
        debug!(
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            request_units = result.total_request_units,
            "Bulk delete finished"
        );
        Ok(result)
    }
}
