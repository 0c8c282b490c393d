use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::device::session::DeviceSession;
use crate::errors::HarnessResult;

/// Fixed delay for the places where the UI offers nothing to poll
/// (post-navigation animations). Prefer `wait_until` when a condition
/// exists.
pub async fn settle(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// Polls `cond` until it returns true or `timeout` elapses. Returns
/// `Ok(false)` on timeout; only the condition itself can fail.
pub async fn wait_until<F, Fut>(
    mut cond: F,
    timeout: Duration,
    interval: Duration,
) -> HarnessResult<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = HarnessResult<bool>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if cond().await? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(interval).await;
    }
}

/// Waits for an element id to appear, polling every 500 ms.
pub async fn wait_for_element(
    session: &dyn DeviceSession,
    id: &str,
    timeout: Duration,
) -> HarnessResult<bool> {
    let found = wait_until(
        || session.element_exists(id),
        timeout,
        Duration::from_millis(500),
    )
    .await?;
    if !found {
        tracing::warn!(id, ?timeout, "element did not appear");
    }
    Ok(found)
}
