//! Long-running service: wires the sync loop, the daily finalizer and the
//! override worker around one ledger and one fact source.

use crate::config::Config;
use crate::core::today::TodaySnapshot;
use crate::core::week::week_view;
use crate::errors::AppResult;
use crate::ledger::Ledger;
use crate::models::roster::RosterEntry;
use crate::models::today::Snapshot;
use crate::models::week::WeekMatrix;
use crate::overrides::{OverrideQueue, OverrideWorker};
use crate::source::FactSource;
use crate::sync::{Clock, DailyFinalizer, RetryPolicy, SyncScheduler, Synchronizer};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub struct Service {
    ledger: Arc<dyn Ledger>,
    source: Arc<dyn FactSource>,
    roster: Arc<Vec<RosterEntry>>,
    snapshot: Arc<TodaySnapshot>,
    overrides: OverrideQueue,
    shutdown_tx: watch::Sender<bool>,
    tasks: Vec<(&'static str, JoinHandle<u64>)>,
}

impl Service {
    /// Spawn all background tasks on the current tokio runtime.
    pub fn start(
        cfg: &Config,
        ledger: Arc<dyn Ledger>,
        source: Arc<dyn FactSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let roster = Arc::new(cfg.roster.clone());
        let snapshot = Arc::new(TodaySnapshot::new());

        let sync = Arc::new(Synchronizer::new(
            Arc::clone(&ledger),
            Arc::clone(&source),
            Arc::clone(&roster),
            Arc::clone(&snapshot),
            Arc::clone(&clock),
        ));

        let mut tasks = Vec::new();

        let scheduler = SyncScheduler::new(Arc::clone(&sync), Arc::clone(&clock), &cfg.sync);
        tasks.push((
            "sync-scheduler",
            tokio::spawn(scheduler.run(shutdown_rx.clone())),
        ));

        if cfg.sync.finalize_daily {
            let retry = RetryPolicy::new(
                Duration::from_secs(cfg.sync.retry_initial_secs),
                Duration::from_secs(cfg.sync.retry_max_secs),
                cfg.sync.retry_attempts,
            );
            let finalizer = DailyFinalizer::new(Arc::clone(&sync), Arc::clone(&clock), retry);
            tasks.push((
                "daily-finalizer",
                tokio::spawn(finalizer.run(shutdown_rx.clone())),
            ));
        }

        let (overrides, rx) = OverrideQueue::channel(
            cfg.overrides.queue_capacity,
            cfg.overrides.send_timeout(),
        );
        let worker = OverrideWorker::new(Arc::clone(&ledger), rx);
        tasks.push(("override-worker", tokio::spawn(worker.run(shutdown_rx))));

        info!(
            users = roster.len(),
            interval_mins = cfg.sync.interval_minutes,
            "service started"
        );

        Self {
            ledger,
            source,
            roster,
            snapshot,
            overrides,
            shutdown_tx,
            tasks,
        }
    }

    /// Latest "today" snapshot, for a front end embedding the service.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.get()
    }

    pub fn week_view(&self, week_offset: i64) -> AppResult<WeekMatrix> {
        week_view(self.ledger.as_ref(), &self.roster, week_offset)
    }

    /// Producer side of the override worker. Commands submitted here are
    /// applied in receipt order by the service's own worker.
    pub fn overrides(&self) -> &OverrideQueue {
        &self.overrides
    }

    /// Signal every task, wait for them and close the fact source.
    pub async fn shutdown(self) -> AppResult<()> {
        info!("shutdown requested");
        // receivers may all be gone already
        let _ = self.shutdown_tx.send(true);

        for (name, handle) in self.tasks {
            match handle.await {
                Ok(count) => info!(task = name, count, "task stopped"),
                Err(e) => error!(task = name, "task failed: {e}"),
            }
        }

        self.source.close().await
    }
}
