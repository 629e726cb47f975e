//! Simulated latency.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Wait for `latency`, giving up as soon as `cancel` fires.
///
/// Returns `false` when cancelled.
pub(crate) async fn wait(latency: Duration, cancel: &CancellationToken) -> bool {
    if cancel.is_cancelled() {
        return false;
    }

    if latency.is_zero() {
        return true;
    }

    tokio::select! {
        () = cancel.cancelled() => false,
        () = tokio::time::sleep(latency) => true,
    }
}
