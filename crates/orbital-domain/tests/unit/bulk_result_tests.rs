//! Bulk Result Tests

use orbital_domain::ports::StoreStatus;
use orbital_domain::{BulkOperationError, BulkOperationResult, Error};

#[test]
fn test_empty_result_is_success() {
    let result: BulkOperationResult<String> = BulkOperationResult::default();
    assert!(result.is_success());
    assert_eq!(result.processed(), 0);
    assert_eq!(result.total_request_units, 0.0);
}

#[test]
fn test_cost_counts_successes_only() {
    let mut result = BulkOperationResult::default();
    result.push_success("a".to_string(), 5.0);
    result.push_success("b".to_string(), 2.5);
    result.push_failure(BulkOperationError::new(
        Some("c".to_string()),
        Error::store(StoreStatus::Conflict, "exists"),
    ));

    assert!(!result.is_success());
    assert_eq!(result.processed(), 3);
    assert!((result.total_request_units - 7.5).abs() < f64::EPSILON);
}

#[test]
fn test_error_message_defaults_to_error_text() {
    let failure: BulkOperationError<String> =
        BulkOperationError::new(None, Error::store(StoreStatus::NotFound, "gone"));
    assert!(failure.message.contains("gone"));
    assert!(failure.item.is_none());

    let failure = failure.with_message("custom");
    assert_eq!(failure.message, "custom");
}
