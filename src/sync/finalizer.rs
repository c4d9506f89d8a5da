//! Daily re-sync of the day that just closed.
//!
//! "Today" totals are provisional while the day is open; shortly after
//! local midnight the previous day is fetched once more and stored.

use super::Synchronizer;
use super::clock::{Clock, until_after_midnight};
use super::retry::{RetryPolicy, run_with_retry, sleep_or_shutdown};
use crate::errors::AppError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

/// Delay after midnight before the closed day is fetched.
pub const FINALIZE_GRACE: Duration = Duration::from_secs(5 * 60);

pub struct DailyFinalizer {
    sync: Arc<Synchronizer>,
    clock: Arc<dyn Clock>,
    retry: RetryPolicy,
}

impl DailyFinalizer {
    pub fn new(sync: Arc<Synchronizer>, clock: Arc<dyn Clock>, retry: RetryPolicy) -> Self {
        Self { sync, clock, retry }
    }

    /// Returns the number of days finalized before shutdown.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> u64 {
        info!("daily finalizer started");
        let mut finalized = 0;

        loop {
            let wait = until_after_midnight(self.clock.now().naive_local(), FINALIZE_GRACE);
            if sleep_or_shutdown(wait, &mut shutdown).await {
                break;
            }

            let sync = Arc::clone(&self.sync);
            let result = run_with_retry("finalize-yesterday", &self.retry, &mut shutdown, || {
                let sync = Arc::clone(&sync);
                async move { sync.sync_day(-1).await.map(|_| ()) }
            })
            .await;

            match result {
                Ok(()) => {
                    finalized += 1;
                    info!("previous day finalized");
                }
                Err(AppError::Shutdown) => break,
                Err(e) => error!("previous day not finalized: {e}"),
            }
        }

        info!(days = finalized, "daily finalizer shutting down");
        finalized
    }
}
