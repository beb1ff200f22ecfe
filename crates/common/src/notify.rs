//! Slow-call notification.

use std::future::Future;
use std::time::{Duration, Instant};

/// Await `future`, calling `on_slow` once if it is still pending after `timeout`.
///
/// The deadline only triggers the notification. The future keeps running and
/// its output is returned whenever it completes.
pub async fn notify_if_slow<F, C>(timeout: Duration, future: F, on_slow: C) -> F::Output
where
    F: Future,
    C: FnOnce(Duration),
{
    let started = Instant::now();
    tokio::pin!(future);

    tokio::select! {
        output = &mut future => return output,
        _ = tokio::time::sleep(timeout) => {}
    }

    on_slow(started.elapsed());
    future.await
}
