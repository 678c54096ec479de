//! Helpers shared by the single-item and bulk repositories

use crate::constants::NO_RESPONSE_STATUS_CODE;
use crate::utils::TimedOperation;
use orbital_domain::entities::Entity;
use orbital_domain::error::{Error, Result};
use orbital_domain::ports::{OperationObserver, StoreResponse, StoreStatus};
use orbital_domain::value_objects::{OperationStatistics, PartitionKey};

/// Report one store call to the observer
///
/// A call that failed before the store answered (transport error or
/// cancellation) is reported with the error's store status, or
/// `Other(NO_RESPONSE_STATUS_CODE)` and no charge.
pub(crate) fn report<E: Entity>(
    observer: &dyn OperationObserver,
    operation: &'static str,
    partition_key: &PartitionKey,
    outcome: &Result<StoreResponse>,
    timer: &TimedOperation,
) {
    let (status, request_charge, failed_request_count) = match outcome {
        Ok(response) => (
            response.status,
            Some(response.request_charge),
            response.diagnostics.failed_request_count,
        ),
        Err(err) => (
            err.status()
                .unwrap_or(StoreStatus::Other(NO_RESPONSE_STATUS_CODE)),
            None,
            0,
        ),
    };
    observer.record(&OperationStatistics {
        operation,
        entity_type: E::TYPE_NAME,
        partition_key: partition_key.to_string(),
        status,
        elapsed_ms: timer.elapsed_ms(),
        request_charge,
        failed_request_count,
    });
}

/// Deserialize the document carried by a successful response
pub(crate) fn decode<E: Entity>(response: StoreResponse) -> Result<E> {
    let resource = response.resource.ok_or_else(|| {
        Error::internal(format!(
            "Store returned {} without a document",
            response.status
        ))
    })?;
    Ok(serde_json::from_value(resource)?)
}

/// Fatal error for a status the caller cannot absorb
pub(crate) fn unexpected_status<E: Entity>(
    operation: &'static str,
    id: &str,
    status: StoreStatus,
) -> Error {
    Error::store(
        status,
        format!("{operation} of {} '{id}' failed", E::TYPE_NAME),
    )
}
