//! Minimum display time for loading indicators

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

/// Await `future`, then wait out whatever is left of `min`
///
/// Time spent in the future counts toward `min`, so a slow call adds no
/// extra delay. `Duration::ZERO` returns as soon as the future does.
pub async fn hold_at_least<F>(min: Duration, future: F) -> F::Output
where
    F: Future,
{
    let start = Instant::now();
    let output = future.await;

    let elapsed = start.elapsed();
    if elapsed < min {
        sleep(min - elapsed).await;
    }
    output
}
