use crate::errors::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, warn};

/// Exponential backoff for one sync cycle.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub initial: Duration,
    pub max: Duration,
    /// Total attempts per cycle, the first one included.
    pub attempts: u32,
}

impl RetryPolicy {
    pub fn new(initial: Duration, max: Duration, attempts: u32) -> Self {
        Self {
            initial,
            max,
            attempts: attempts.max(1),
        }
    }

    /// Delay after the `failed`-th failure (1-based).
    pub fn backoff(&self, failed: u32) -> Duration {
        let factor = 2u32.saturating_pow(failed.saturating_sub(1));
        self.initial.saturating_mul(factor).min(self.max)
    }
}

/// Sleep for `duration` unless shutdown is requested first.
/// Returns `true` when the caller should stop.
pub async fn sleep_or_shutdown(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    let deadline = tokio::time::Instant::now() + duration;
    loop {
        if *shutdown.borrow_and_update() {
            return true;
        }
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => return false,
            changed = shutdown.changed() => {
                // sender gone: nobody can ever stop us cleanly, so stop now
                if changed.is_err() {
                    return true;
                }
            }
        }
    }
}

/// Run `op` until it succeeds, the policy is exhausted or shutdown is
/// requested. Failures are logged with `label`.
pub async fn run_with_retry<F, Fut>(
    label: &str,
    policy: &RetryPolicy,
    shutdown: &mut watch::Receiver<bool>,
    mut op: F,
) -> AppResult<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    let mut failed = 0;
    loop {
        let err = match op().await {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        failed += 1;
        if failed >= policy.attempts {
            error!(task = label, attempts = failed, "giving up on this cycle: {err}");
            return Err(err);
        }

        let delay = policy.backoff(failed);
        warn!(
            task = label,
            attempt = failed,
            retry_in_secs = delay.as_secs(),
            "sync failed: {err}"
        );
        if sleep_or_shutdown(delay, shutdown).await {
            return Err(AppError::Shutdown);
        }
    }
}
