//! Periodic "today" refresh preceded by a startup backfill.

use super::Synchronizer;
use super::clock::{Clock, until_next_boundary};
use super::retry::{RetryPolicy, run_with_retry, sleep_or_shutdown};
use crate::config::SyncConfig;
use crate::errors::AppError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Backfilling,
    SteadyState,
}

pub struct SyncScheduler {
    sync: Arc<Synchronizer>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    backfill_days: u32,
    retry: RetryPolicy,
    phase: SyncPhase,
    completed_cycles: u64,
}

impl SyncScheduler {
    pub fn new(sync: Arc<Synchronizer>, clock: Arc<dyn Clock>, cfg: &SyncConfig) -> Self {
        Self {
            sync,
            clock,
            interval: cfg.interval().max(Duration::from_secs(1)),
            backfill_days: cfg.backfill_days,
            retry: RetryPolicy::new(
                Duration::from_secs(cfg.retry_initial_secs),
                Duration::from_secs(cfg.retry_max_secs),
                cfg.retry_attempts,
            ),
            phase: SyncPhase::Backfilling,
            completed_cycles: 0,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Backfill once, then refresh "today" on every interval boundary of the
    /// wall clock until `shutdown` turns true. Boundaries missed by a long
    /// retry sequence are skipped, never caught up. Returns the number of successful refresh cycles.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        info!(days = self.backfill_days, "sync scheduler started, backfilling");

        match self.sync.backfill(self.backfill_days).await {
            Ok(days) => info!(days, "startup backfill done"),
            Err(e) => error!("startup backfill aborted: {e}"),
        }

        self.phase = SyncPhase::SteadyState;

        let first_wait = until_next_boundary(self.clock.now().naive_local(), self.interval);
        info!(
            wait_secs = first_wait.as_secs(),
            interval_secs = self.interval.as_secs(),
            "entering steady state, aligning to the next interval boundary"
        );
        let mut next_tick = Instant::now() + first_wait;
        if sleep_or_shutdown(first_wait, &mut shutdown).await {
            info!("sync scheduler shutting down");
            return self.completed_cycles;
        }

        loop {
            let sync = Arc::clone(&self.sync);
            let result = run_with_retry("refresh-today", &self.retry, &mut shutdown, || {
                let sync = Arc::clone(&sync);
                async move { sync.refresh_today().await }
            })
            .await;

            match result {
                Ok(()) => self.completed_cycles += 1,
                Err(AppError::Shutdown) => break,
                Err(e) => warn!("refresh cycle abandoned, next attempt on schedule: {e}"),
            }

            let now = Instant::now();
            while next_tick <= now {
                next_tick += self.interval;
            }
            if sleep_or_shutdown(next_tick.saturating_duration_since(now), &mut shutdown).await {
                break;
            }
        }

        info!(cycles = self.completed_cycles, "sync scheduler shutting down");
        self.completed_cycles
    }
}
