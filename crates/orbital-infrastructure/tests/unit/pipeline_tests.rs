//! Retry and pipeline composition tests

use crate::common::throttled;
use orbital_domain::ports::StoreStatus;
use orbital_domain::{CancellationToken, Error, Result};
use orbital_infrastructure::resilience::{
    BackoffType, CircuitBreakerOptions, CircuitBreakerState, ResiliencePipeline, RetryOptions,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn retry(max_retry_attempts: u32) -> RetryOptions {
    RetryOptions::default()
        .with_max_retry_attempts(max_retry_attempts)
        .with_delay(Duration::from_millis(100))
        .with_backoff(BackoffType::Constant)
}

#[test]
fn test_delay_for_each_backoff_type() {
    let base = RetryOptions::default().with_delay(Duration::from_millis(100));

    let constant = base.clone().with_backoff(BackoffType::Constant);
    assert_eq!(constant.delay_for(0), Duration::from_millis(100));
    assert_eq!(constant.delay_for(4), Duration::from_millis(100));

    let linear = base.clone().with_backoff(BackoffType::Linear);
    assert_eq!(linear.delay_for(0), Duration::from_millis(100));
    assert_eq!(linear.delay_for(2), Duration::from_millis(300));

    let exponential = base.with_backoff(BackoffType::Exponential);
    assert_eq!(exponential.delay_for(0), Duration::from_millis(100));
    assert_eq!(exponential.delay_for(3), Duration::from_millis(800));
}

#[test]
fn test_delay_is_capped() {
    let options = RetryOptions::default()
        .with_delay(Duration::from_secs(1))
        .with_backoff(BackoffType::Exponential)
        .with_max_delay(Some(Duration::from_secs(5)));

    assert_eq!(options.delay_for(2), Duration::from_secs(4));
    assert_eq!(options.delay_for(3), Duration::from_secs(5));
    assert_eq!(options.delay_for(200), Duration::from_secs(5));
}

#[test]
fn test_default_retry_handles_only_transient_errors() {
    let options = RetryOptions::default();
    assert!(options.handles(&throttled()));
    assert!(options.handles(&Error::store(StoreStatus::Timeout, "slow")));
    assert!(!options.handles(&Error::store(StoreStatus::Other(500), "boom")));
    assert!(!options.handles(&Error::Cancelled));
}

#[tokio::test]
async fn test_empty_pipeline_runs_once_and_passes_errors_through() {
    let pipeline = ResiliencePipeline::empty();
    let calls = AtomicUsize::new(0);

    let err = pipeline
        .execute(&CancellationToken::new(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(throttled())
        })
        .await
        .unwrap_err();

    assert!(pipeline.is_empty());
    assert_eq!(pipeline.name(), "empty");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(err.status(), Some(StoreStatus::Throttled));
}

#[tokio::test(start_paused = true)]
async fn test_retries_transient_failures_until_success() {
    let pipeline = ResiliencePipeline::builder("retry").add_retry(retry(3)).build();
    let calls = AtomicUsize::new(0);

    let value = pipeline
        .execute(&CancellationToken::new(), || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(throttled())
            } else {
                Ok("done")
            }
        })
        .await
        .unwrap();

    assert_eq!(value, "done");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_gives_up_after_max_retry_attempts() {
    let pipeline = ResiliencePipeline::builder("retry").add_retry(retry(2)).build();
    let calls = AtomicUsize::new(0);

    let err = pipeline
        .execute(&CancellationToken::new(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(Error::store(StoreStatus::Timeout, "gateway timeout"))
        })
        .await
        .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(err.status(), Some(StoreStatus::Timeout));
}

#[tokio::test(start_paused = true)]
async fn test_fatal_errors_are_not_retried() {
    let pipeline = ResiliencePipeline::builder("retry").add_retry(retry(5)).build();
    let calls = AtomicUsize::new(0);

    let err = pipeline
        .execute(&CancellationToken::new(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(Error::store(StoreStatus::Other(403), "forbidden"))
        })
        .await
        .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(err.status(), Some(StoreStatus::Other(403)));
}

#[tokio::test(start_paused = true)]
async fn test_custom_retry_predicate() {
    let options = retry(1).handle(Error::is_conflict);
    let pipeline = ResiliencePipeline::builder("conflicts").add_retry(options).build();
    let calls = AtomicUsize::new(0);

    let result: Result<()> = pipeline
        .execute(&CancellationToken::new(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::store(StoreStatus::Conflict, "exists"))
        })
        .await;

    assert!(result.unwrap_err().is_conflict());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cancellation_interrupts_retry_delay() {
    let pipeline = ResiliencePipeline::builder("slow")
        .add_retry(retry(3).with_delay(Duration::from_secs(3600)))
        .build();
    let cancel = CancellationToken::new();
    let calls = AtomicUsize::new(0);

    let err = pipeline
        .execute(&cancel, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            cancel.cancel();
            Err::<(), _>(throttled())
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_open_breaker_stops_retries() {
    let pipeline = ResiliencePipeline::builder("combined")
        .add_retry(retry(5).with_delay(Duration::from_millis(1)))
        .add_circuit_breaker(
            CircuitBreakerOptions::default()
                .with_failure_ratio(1.0)
                .with_minimum_throughput(2)
                .with_break_duration(Duration::from_secs(60)),
        )
        .build();
    let calls = AtomicUsize::new(0);

    let err = pipeline
        .execute(&CancellationToken::new(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err::<(), _>(throttled())
        })
        .await
        .unwrap_err();

    assert!(err.is_circuit_open());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    let breaker = pipeline.circuit_breaker().unwrap();
    assert_eq!(breaker.state(), CircuitBreakerState::Open);
    assert_eq!(breaker.name(), "combined");
}

#[tokio::test]
async fn test_breaker_state_is_shared_across_calls() {
    let pipeline = ResiliencePipeline::builder("shared")
        .add_circuit_breaker(
            CircuitBreakerOptions::default()
                .with_failure_ratio(1.0)
                .with_minimum_throughput(3)
                .with_break_duration(Duration::from_secs(60)),
        )
        .build();
    let cancel = CancellationToken::new();

    for _ in 0..3 {
        let _ = pipeline
            .execute(&cancel, || async { Err::<(), _>(throttled()) })
            .await;
    }
    let calls = AtomicUsize::new(0);
    let err = pipeline
        .execute(&cancel, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await
        .unwrap_err();

    assert!(err.is_circuit_open());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(pipeline.retry().is_none());
    assert!(!pipeline.is_empty());
}
