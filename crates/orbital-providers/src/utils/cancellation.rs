//! Cancellation helpers

use orbital_domain::error::{Error, Result};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Run `future` unless `cancel` fires first
///
/// An already-cancelled token wins without polling the future.
pub async fn cancellable<F, T>(cancel: &CancellationToken, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::Cancelled),
        result = future => result,
    }
}
