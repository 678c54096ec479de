//! Store Status Tests

use orbital_domain::ports::StoreStatus;

#[test]
fn test_from_code() {
    assert_eq!(StoreStatus::from_code(201), StoreStatus::Success(201));
    assert_eq!(StoreStatus::from_code(204), StoreStatus::Success(204));
    assert_eq!(StoreStatus::from_code(404), StoreStatus::NotFound);
    assert_eq!(StoreStatus::from_code(409), StoreStatus::Conflict);
    assert_eq!(StoreStatus::from_code(412), StoreStatus::PreconditionFailed);
    assert_eq!(StoreStatus::from_code(429), StoreStatus::Throttled);
    assert_eq!(StoreStatus::from_code(408), StoreStatus::Timeout);
    assert_eq!(StoreStatus::from_code(504), StoreStatus::Timeout);
    assert_eq!(StoreStatus::from_code(503), StoreStatus::Other(503));
}

#[test]
fn test_code_roundtrip_for_named_statuses() {
    for status in [
        StoreStatus::Conflict,
        StoreStatus::NotFound,
        StoreStatus::PreconditionFailed,
        StoreStatus::Throttled,
        StoreStatus::Timeout,
    ] {
        assert_eq!(StoreStatus::from_code(status.code()), status);
    }
}

#[test]
fn test_predicates() {
    assert!(StoreStatus::Success(200).is_success());
    assert!(!StoreStatus::NotFound.is_success());
    assert!(StoreStatus::Throttled.is_transient());
    assert!(!StoreStatus::Other(500).is_transient());
}
