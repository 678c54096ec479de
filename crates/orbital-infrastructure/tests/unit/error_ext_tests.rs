//! Error context extension tests

use orbital_domain::Error;
use orbital_infrastructure::error_ext::{ErrorContext, config_error};
use std::error::Error as _;
use std::io;

fn io_failure() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
}

#[test]
fn test_io_context() {
    let err = io_failure().io_context("Failed to read config").unwrap_err();

    match &err {
        Error::Io { message, source } => {
            assert_eq!(message, "Failed to read config: no such file");
            assert!(source.is_some());
        }
        other => panic!("expected Io, got {other:?}"),
    }
    assert!(err.source().is_some());
}

#[test]
fn test_config_context() {
    let err = io_failure().config_context("Bad settings").unwrap_err();

    assert!(matches!(err, Error::Configuration { source: Some(_), .. }));
    assert_eq!(
        err.to_string(),
        "Configuration error: Bad settings: no such file"
    );
}

#[test]
fn test_context_and_lazy_context() {
    let err = io_failure().context("Serializer failed").unwrap_err();
    assert!(matches!(
        &err,
        Error::Infrastructure { message, source: Some(_) } if message == "Serializer failed: no such file"
    ));

    let mut evaluated = false;
    let ok: Result<u8, io::Error> = Ok(3);
    let value = ok
        .with_context(|| {
            evaluated = true;
            "never built"
        })
        .unwrap();
    assert_eq!(value, 3);
    assert!(!evaluated);

    let err = io_failure()
        .with_context(|| format!("attempt {}", 2))
        .unwrap_err();
    assert_eq!(err.to_string(), "Infrastructure error: attempt 2: no such file");
}

#[test]
fn test_config_error_has_no_source() {
    let err = config_error("missing database name");

    assert!(matches!(err, Error::Configuration { source: None, .. }));
    assert!(err.source().is_none());
    assert_eq!(err.to_string(), "Configuration error: missing database name");
}
