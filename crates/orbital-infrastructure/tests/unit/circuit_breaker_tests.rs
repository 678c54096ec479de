//! Circuit breaker state machine tests

use crate::common::throttled;
use orbital_domain::Error;
use orbital_domain::ports::StoreStatus;
use orbital_infrastructure::resilience::{
    CircuitBreaker, CircuitBreakerOptions, CircuitBreakerState, default_break_duration,
    exponential_break_duration,
};
use std::future::pending;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;

fn breaker(minimum_throughput: u32, break_duration: Duration) -> CircuitBreaker {
    CircuitBreaker::new(
        "test",
        CircuitBreakerOptions::default()
            .with_failure_ratio(0.5)
            .with_minimum_throughput(minimum_throughput)
            .with_sampling_duration(Duration::from_secs(30))
            .with_break_duration(break_duration),
    )
}

async fn fail(breaker: &CircuitBreaker) -> Error {
    breaker
        .execute(|| async { Err::<(), _>(throttled()) })
        .await
        .unwrap_err()
}

async fn succeed(breaker: &CircuitBreaker) -> orbital_domain::Result<u32> {
    breaker.execute(|| async { Ok(7) }).await
}

#[test]
fn test_default_break_duration_is_capped_exponential() {
    assert_eq!(default_break_duration(0), Duration::from_secs(1));
    assert_eq!(default_break_duration(1), Duration::from_secs(2));
    assert_eq!(default_break_duration(5), Duration::from_secs(32));
    assert_eq!(default_break_duration(6), Duration::from_secs(60));
    assert_eq!(default_break_duration(40), Duration::from_secs(60));
    assert_eq!(default_break_duration(u32::MAX), Duration::from_secs(60));
}

#[test]
fn test_exponential_break_duration_respects_cap() {
    let cap = Duration::from_secs(10);
    assert_eq!(exponential_break_duration(3, cap), Duration::from_secs(8));
    assert_eq!(exponential_break_duration(4, cap), cap);
}

#[test]
fn test_state_display() {
    assert_eq!(CircuitBreakerState::Closed.to_string(), "closed");
    assert_eq!(CircuitBreakerState::Open.to_string(), "open");
    assert_eq!(CircuitBreakerState::HalfOpen.to_string(), "half-open");
}

#[tokio::test]
async fn test_stays_closed_below_minimum_throughput() {
    let breaker = breaker(4, Duration::from_secs(60));
    for _ in 0..3 {
        fail(&breaker).await;
    }

    assert_eq!(breaker.state(), CircuitBreakerState::Closed);
    assert_eq!(breaker.consecutive_failures(), 3);
}

#[tokio::test]
async fn test_opens_and_rejects_without_invoking_operation() {
    let breaker = breaker(4, Duration::from_secs(60));
    for _ in 0..4 {
        fail(&breaker).await;
    }
    assert_eq!(breaker.state(), CircuitBreakerState::Open);

    let invoked = AtomicUsize::new(0);
    let err = breaker
        .execute(|| async {
            invoked.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await
        .unwrap_err();

    assert_eq!(invoked.load(Ordering::SeqCst), 0);
    match err {
        Error::CircuitOpen { pipeline, retry_after } => {
            assert_eq!(pipeline, "test");
            assert!(retry_after > Duration::from_secs(50));
        }
        other => panic!("expected CircuitOpen, got {other:?}"),
    }
}

#[tokio::test]
async fn test_failure_ratio_is_evaluated_over_the_window() {
    let breaker = breaker(4, Duration::from_secs(60));
    for _ in 0..3 {
        succeed(&breaker).await.unwrap();
    }
    fail(&breaker).await;
    fail(&breaker).await;
    assert_eq!(breaker.state(), CircuitBreakerState::Closed);

    fail(&breaker).await;
    assert_eq!(breaker.state(), CircuitBreakerState::Open);
}

#[tokio::test]
async fn test_unhandled_errors_count_as_success() {
    let breaker = breaker(2, Duration::from_secs(60));
    for _ in 0..10 {
        let err = breaker
            .execute(|| async { Err::<(), _>(Error::store(StoreStatus::Other(500), "boom")) })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(StoreStatus::Other(500)));
    }

    assert_eq!(breaker.state(), CircuitBreakerState::Closed);
    assert_eq!(breaker.consecutive_failures(), 0);
}

#[tokio::test]
async fn test_sampling_window_resets() {
    let breaker = CircuitBreaker::new(
        "window",
        CircuitBreakerOptions::default()
            .with_failure_ratio(1.0)
            .with_minimum_throughput(3)
            .with_sampling_duration(Duration::from_millis(50)),
    );
    fail(&breaker).await;
    fail(&breaker).await;
    tokio::time::sleep(Duration::from_millis(80)).await;
    fail(&breaker).await;

    assert_eq!(breaker.state(), CircuitBreakerState::Closed);
}

#[tokio::test]
async fn test_successful_probe_closes() {
    let breaker = breaker(2, Duration::from_millis(40));
    fail(&breaker).await;
    fail(&breaker).await;
    assert_eq!(breaker.state(), CircuitBreakerState::Open);

    tokio::time::sleep(Duration::from_millis(70)).await;
    assert_eq!(succeed(&breaker).await.unwrap(), 7);

    assert_eq!(breaker.state(), CircuitBreakerState::Closed);
    assert_eq!(breaker.consecutive_failures(), 0);
}

#[tokio::test]
async fn test_failed_probe_reopens_with_longer_break() {
    let breaker = CircuitBreaker::new(
        "probe",
        CircuitBreakerOptions::default()
            .with_failure_ratio(0.5)
            .with_minimum_throughput(2)
            .with_break_duration_generator(|failures| Duration::from_millis(20 * u64::from(failures))),
    );
    fail(&breaker).await;
    fail(&breaker).await;
    tokio::time::sleep(Duration::from_millis(60)).await;

    fail(&breaker).await;

    assert_eq!(breaker.state(), CircuitBreakerState::Open);
    assert_eq!(breaker.consecutive_failures(), 3);
    match succeed(&breaker).await.unwrap_err() {
        Error::CircuitOpen { retry_after, .. } => {
            assert!(retry_after > Duration::from_millis(40));
        }
        other => panic!("expected CircuitOpen, got {other:?}"),
    }
}

#[tokio::test]
async fn test_late_success_keeps_failure_count_while_open() {
    let breaker = Arc::new(CircuitBreaker::new(
        "late",
        CircuitBreakerOptions::default()
            .with_failure_ratio(0.5)
            .with_minimum_throughput(2)
            .with_break_duration_generator(|failures| Duration::from_millis(20 * u64::from(failures))),
    ));
    let (entered_tx, entered_rx) = oneshot::channel::<()>();
    let (release_tx, release_rx) = oneshot::channel::<()>();
    let slow = tokio::spawn({
        let breaker = Arc::clone(&breaker);
        async move {
            breaker
                .execute(|| async move {
                    entered_tx.send(()).ok();
                    release_rx.await.ok();
                    Ok(1)
                })
                .await
        }
    });

    entered_rx.await.unwrap();
    fail(&breaker).await;
    fail(&breaker).await;
    assert_eq!(breaker.state(), CircuitBreakerState::Open);

    release_tx.send(()).ok();
    assert_eq!(slow.await.unwrap().unwrap(), 1);

    assert_eq!(breaker.state(), CircuitBreakerState::Open);
    assert_eq!(breaker.consecutive_failures(), 2);

    tokio::time::sleep(Duration::from_millis(60)).await;
    fail(&breaker).await;

    assert_eq!(breaker.consecutive_failures(), 3);
    match succeed(&breaker).await.unwrap_err() {
        Error::CircuitOpen { retry_after, .. } => {
            assert!(retry_after > Duration::from_millis(40));
        }
        other => panic!("expected CircuitOpen, got {other:?}"),
    }
}

#[tokio::test]
async fn test_half_open_admits_a_single_probe() {
    let breaker = Arc::new(breaker(2, Duration::from_millis(20)));
    fail(&breaker).await;
    fail(&breaker).await;
    tokio::time::sleep(Duration::from_millis(40)).await;

    let (entered_tx, entered_rx) = oneshot::channel::<()>();
    let (release_tx, release_rx) = oneshot::channel::<()>();
    let probe = tokio::spawn({
        let breaker = Arc::clone(&breaker);
        async move {
            breaker
                .execute(|| async move {
                    entered_tx.send(()).ok();
                    release_rx.await.ok();
                    Ok(1)
                })
                .await
        }
    });

    entered_rx.await.unwrap();
    assert_eq!(breaker.state(), CircuitBreakerState::HalfOpen);
    let competitor = succeed(&breaker).await;
    release_tx.send(()).ok();

    assert!(competitor.unwrap_err().is_circuit_open());
    assert_eq!(probe.await.unwrap().unwrap(), 1);
    assert_eq!(breaker.state(), CircuitBreakerState::Closed);
}

#[tokio::test]
async fn test_abandoned_probe_frees_the_slot() {
    let breaker = breaker(2, Duration::from_millis(20));
    fail(&breaker).await;
    fail(&breaker).await;
    tokio::time::sleep(Duration::from_millis(40)).await;

    let abandoned = tokio::time::timeout(
        Duration::from_millis(10),
        breaker.execute(|| pending::<orbital_domain::Result<u32>>()),
    )
    .await;
    assert!(abandoned.is_err());
    assert_eq!(breaker.state(), CircuitBreakerState::HalfOpen);

    assert_eq!(succeed(&breaker).await.unwrap(), 7);
    assert_eq!(breaker.state(), CircuitBreakerState::Closed);
}
