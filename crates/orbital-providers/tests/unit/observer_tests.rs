//! Tests for the operation observers

use orbital_domain::OperationStatistics;
use orbital_domain::ports::{OperationObserver, StoreStatus};
use orbital_providers::{NullOperationObserver, TracingOperationObserver};
use std::sync::Arc;

fn sample() -> OperationStatistics {
    OperationStatistics {
        operation: "create",
        entity_type: "TestDocument",
        partition_key: "[\"tenant-1\"]".to_string(),
        status: StoreStatus::Success(201),
        elapsed_ms: 4,
        request_charge: Some(5.0),
        failed_request_count: 0,
    }
}

#[test]
fn test_observers_are_usable_as_trait_objects() {
    let observers: Vec<Arc<dyn OperationObserver>> = vec![
        Arc::new(NullOperationObserver::new()),
        Arc::new(TracingOperationObserver::new()),
    ];
    for observer in observers {
        observer.record(&sample());
    }
}

#[test]
fn test_statistics_serialize_to_json() {
    let value = serde_json::to_value(sample()).unwrap();
    assert_eq!(value["operation"], "create");
    assert_eq!(value["elapsed_ms"], 4);
}
