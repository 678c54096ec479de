//! Document Store Port
//!
//! Contract of the external document store, scoped to a single container.
//! Expected outcomes (conflict, not found, precondition failed, throttling)
//! come back as a [`StoreStatus`] inside an `Ok` response so callers can
//! pattern-match them; `Err` is reserved for transport-level failures.

use crate::error::Result;
use crate::value_objects::PartitionKey;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Status classification of a store call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreStatus {
    /// 2xx with the concrete code
    Success(u16),
    /// Id already exists in the partition
    Conflict,
    /// Document does not exist
    NotFound,
    /// If-match etag did not match the stored version
    PreconditionFailed,
    /// Request rate exceeded the provisioned capacity
    Throttled,
    /// Request or gateway timeout
    Timeout,
    /// Anything else, with the concrete code
    Other(u16),
}

impl StoreStatus {
    /// Classify an HTTP-like status code
    pub fn from_code(code: u16) -> Self {
        match code {
            200..=299 => Self::Success(code),
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            409 => Self::Conflict,
            412 => Self::PreconditionFailed,
            429 => Self::Throttled,
            _ => Self::Other(code),
        }
    }

    /// HTTP-like status code
    pub fn code(self) -> u16 {
        match self {
            Self::Success(code) | Self::Other(code) => code,
            Self::NotFound => 404,
            Self::Timeout => 408,
            Self::Conflict => 409,
            Self::PreconditionFailed => 412,
            Self::Throttled => 429,
        }
    }

    /// 2xx
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Throttling or timeout
    pub fn is_transient(self) -> bool {
        matches!(self, Self::Throttled | Self::Timeout)
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success(_) => "Success",
            Self::Conflict => "Conflict",
            Self::NotFound => "NotFound",
            Self::PreconditionFailed => "PreconditionFailed",
            Self::Throttled => "TooManyRequests",
            Self::Timeout => "Timeout",
            Self::Other(_) => "Other",
        };
        write!(f, "{} {}", self.code(), name)
    }
}

/// Client-side diagnostics attached to a store response
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StoreDiagnostics {
    /// Time the client spent on the call, including internal retries
    pub client_elapsed: Duration,
    /// Sub-requests that failed and were retried inside the store client
    pub failed_request_count: u32,
}

/// Response to a per-item store call
#[derive(Debug, Clone, PartialEq)]
pub struct StoreResponse {
    /// Status classification
    pub status: StoreStatus,
    /// Document as stored, for successful reads and writes
    pub resource: Option<Value>,
    /// Cost units charged
    pub request_charge: f64,
    /// Client diagnostics
    pub diagnostics: StoreDiagnostics,
}

impl StoreResponse {
    /// Response with the given status and nothing else
    pub fn new(status: StoreStatus) -> Self {
        Self {
            status,
            resource: None,
            request_charge: 0.0,
            diagnostics: StoreDiagnostics::default(),
        }
    }

    /// Attach the stored document
    #[must_use]
    pub fn with_resource(mut self, resource: Value) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Attach the charged cost
    #[must_use]
    pub fn with_request_charge(mut self, request_charge: f64) -> Self {
        self.request_charge = request_charge;
        self
    }

    /// Attach client diagnostics
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: StoreDiagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}

/// Response to a batched read
#[derive(Debug, Clone, PartialEq)]
pub struct FeedResponse {
    /// Status classification of the batch as a whole
    pub status: StoreStatus,
    /// Documents the store resolved; missing ids are simply absent
    pub resources: Vec<Value>,
    /// Cost units charged
    pub request_charge: f64,
    /// Client diagnostics
    pub diagnostics: StoreDiagnostics,
}

/// Document store scoped to one container
///
/// # Implementations
///
/// - **InMemory**: concurrent map for development and testing
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Write a new document; `Conflict` when the id already exists in the partition
    async fn create_item(&self, item: Value, partition_key: &PartitionKey)
    -> Result<StoreResponse>;

    /// Read one document; `NotFound` when absent
    async fn read_item(&self, id: &str, partition_key: &PartitionKey) -> Result<StoreResponse>;

    /// Insert or replace; with `if_match` the write only applies to that version
    async fn upsert_item(
        &self,
        item: Value,
        partition_key: &PartitionKey,
        if_match: Option<&str>,
    ) -> Result<StoreResponse>;

    /// Remove one document; `NotFound` when absent
    async fn delete_item(&self, id: &str, partition_key: &PartitionKey) -> Result<StoreResponse>;

    /// Read several documents of one partition in a single request
    async fn read_many_items(
        &self,
        ids: &[String],
        partition_key: &PartitionKey,
    ) -> Result<FeedResponse>;

    /// Name of the container this store targets
    fn container_name(&self) -> &str;
}
