//! In-memory document store provider implementation
//!
//! Provides an in-memory document store for development and testing.
//! Behaves like the real store for the statuses repositories care about:
//! duplicate creates conflict, if-match writes against another version fail
//! the precondition, and every successful write gets a fresh etag.

use crate::constants::{IN_MEMORY_DELETE_CHARGE, IN_MEMORY_READ_CHARGE, IN_MEMORY_WRITE_CHARGE};
use crate::utils::TimedOperation;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use orbital_domain::constants::{DOCUMENT_ETAG_FIELD, DOCUMENT_ID_FIELD};
use orbital_domain::error::Result;
use orbital_domain::ports::{
    DocumentStore, FeedResponse, StoreDiagnostics, StoreResponse, StoreStatus,
};
use orbital_domain::value_objects::PartitionKey;
use serde_json::Value;

type DocumentKey = (PartitionKey, String);

/// In-memory document store provider
///
/// Documents are keyed by partition key and id, so the same id can exist
/// in two partitions.
pub struct InMemoryDocumentStore {
    container: String,
    documents: DashMap<DocumentKey, Value>,
}

impl InMemoryDocumentStore {
    /// Create an empty store for `container`
    pub fn new<S: Into<String>>(container: S) -> Self {
        Self {
            container: container.into(),
            documents: DashMap::new(),
        }
    }

    /// Number of stored documents across all partitions
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Current etag of a document, bypassing the store contract
    pub fn current_etag(&self, id: &str, partition_key: &PartitionKey) -> Option<String> {
        self.documents
            .get(&(partition_key.clone(), id.to_string()))
            .and_then(|doc| etag_of(&doc).map(str::to_string))
    }
}

fn etag_of(document: &Value) -> Option<&str> {
    document.get(DOCUMENT_ETAG_FIELD).and_then(Value::as_str)
}

fn id_of(document: &Value) -> Option<String> {
    document
        .get(DOCUMENT_ID_FIELD)
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn stamp_etag(document: &mut Value) {
    if let Value::Object(fields) = document {
        fields.insert(
            DOCUMENT_ETAG_FIELD.to_string(),
            Value::String(uuid::Uuid::new_v4().to_string()),
        );
    }
}

fn finish(response: StoreResponse, timer: &TimedOperation) -> Result<StoreResponse> {
    Ok(response.with_diagnostics(StoreDiagnostics {
        client_elapsed: timer.elapsed(),
        failed_request_count: 0,
    }))
}

/// Missing or empty `id` field is a malformed request
const BAD_REQUEST: StoreStatus = StoreStatus::Other(400);

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create_item(
        &self,
        mut item: Value,
        partition_key: &PartitionKey,
    ) -> Result<StoreResponse> {
        let timer = TimedOperation::start();
        let Some(id) = id_of(&item) else {
            return finish(StoreResponse::new(BAD_REQUEST), &timer);
        };

        let response = match self.documents.entry((partition_key.clone(), id)) {
            Entry::Occupied(_) => StoreResponse::new(StoreStatus::Conflict),
            Entry::Vacant(slot) => {
                stamp_etag(&mut item);
                slot.insert(item.clone());
                StoreResponse::new(StoreStatus::Success(201))
                    .with_resource(item)
                    .with_request_charge(IN_MEMORY_WRITE_CHARGE)
            }
        };
        finish(response, &timer)
    }

    async fn read_item(&self, id: &str, partition_key: &PartitionKey) -> Result<StoreResponse> {
        let timer = TimedOperation::start();
        let response = match self.documents.get(&(partition_key.clone(), id.to_string())) {
            Some(document) => StoreResponse::new(StoreStatus::Success(200))
                .with_resource(document.value().clone())
                .with_request_charge(IN_MEMORY_READ_CHARGE),
            None => StoreResponse::new(StoreStatus::NotFound).with_request_charge(IN_MEMORY_READ_CHARGE),
        };
        finish(response, &timer)
    }

    async fn upsert_item(
        &self,
        mut item: Value,
        partition_key: &PartitionKey,
        if_match: Option<&str>,
    ) -> Result<StoreResponse> {
        let timer = TimedOperation::start();
        let Some(id) = id_of(&item) else {
            return finish(StoreResponse::new(BAD_REQUEST), &timer);
        };

        let response = match self.documents.entry((partition_key.clone(), id)) {
            Entry::Occupied(mut slot) => {
                if if_match.is_some_and(|expected| etag_of(slot.get()) != Some(expected)) {
                    StoreResponse::new(StoreStatus::PreconditionFailed)
                } else {
                    stamp_etag(&mut item);
                    slot.insert(item.clone());
                    StoreResponse::new(StoreStatus::Success(200))
                        .with_resource(item)
                        .with_request_charge(IN_MEMORY_WRITE_CHARGE)
                }
            }
            Entry::Vacant(_) if if_match.is_some() => StoreResponse::new(StoreStatus::NotFound),
            Entry::Vacant(slot) => {
                stamp_etag(&mut item);
                slot.insert(item.clone());
                StoreResponse::new(StoreStatus::Success(201))
                    .with_resource(item)
                    .with_request_charge(IN_MEMORY_WRITE_CHARGE)
            }
        };
        finish(response, &timer)
    }

    async fn delete_item(&self, id: &str, partition_key: &PartitionKey) -> Result<StoreResponse> {
        let timer = TimedOperation::start();
        let response = match self.documents.remove(&(partition_key.clone(), id.to_string())) {
            Some(_) => StoreResponse::new(StoreStatus::Success(204))
                .with_request_charge(IN_MEMORY_DELETE_CHARGE),
            None => StoreResponse::new(StoreStatus::NotFound),
        };
        finish(response, &timer)
    }

    async fn read_many_items(
        &self,
        ids: &[String],
        partition_key: &PartitionKey,
    ) -> Result<FeedResponse> {
        let timer = TimedOperation::start();
        let resources: Vec<Value> = ids
            .iter()
            .filter_map(|id| {
                self.documents
                    .get(&(partition_key.clone(), id.clone()))
                    .map(|doc| doc.value().clone())
            })
            .collect();

        #[allow(clippy::cast_precision_loss)]
        let request_charge = IN_MEMORY_READ_CHARGE * resources.len().max(1) as f64;

        Ok(FeedResponse {
            status: StoreStatus::Success(200),
            resources,
            request_charge,
            diagnostics: StoreDiagnostics {
                client_elapsed: timer.elapsed(),
                failed_request_count: 0,
            },
        })
    }

    fn container_name(&self) -> &str {
        &self.container
    }
}
