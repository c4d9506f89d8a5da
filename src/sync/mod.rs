//! Reconciliation of ticketing-system facts into the ledger.
//!
//! [`Synchronizer`] performs single sync operations. [`SyncScheduler`] and
//! [`DailyFinalizer`] drive it over time until shutdown.

pub mod clock;
pub mod finalizer;
pub mod retry;
pub mod scheduler;

pub use clock::{Clock, FixedClock, SystemClock};
pub use finalizer::DailyFinalizer;
pub use retry::RetryPolicy;
pub use scheduler::{SyncPhase, SyncScheduler};

use crate::core::calendar::day_from_date;
use crate::core::today::{TodaySnapshot, build_today_rows};
use crate::errors::{AppError, AppResult};
use crate::ledger::Ledger;
use crate::models::Day;
use crate::models::accounted::AccountedTime;
use crate::models::roster::RosterEntry;
use crate::source::FactSource;
use chrono::{Days, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct Synchronizer {
    ledger: Arc<dyn Ledger>,
    source: Arc<dyn FactSource>,
    roster: Arc<Vec<RosterEntry>>,
    snapshot: Arc<TodaySnapshot>,
    clock: Arc<dyn Clock>,
}

impl Synchronizer {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        source: Arc<dyn FactSource>,
        roster: Arc<Vec<RosterEntry>>,
        snapshot: Arc<TodaySnapshot>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ledger,
            source,
            roster,
            snapshot,
            clock,
        }
    }

    /// Local calendar date `offset` days away from today.
    pub fn date_for_offset(&self, offset: i64) -> AppResult<NaiveDate> {
        let today = self.clock.now().date_naive();
        let shifted = if offset >= 0 {
            today.checked_add_days(Days::new(offset as u64))
        } else {
            today.checked_sub_days(Days::new(offset.unsigned_abs()))
        };
        shifted.ok_or_else(|| AppError::Validation(format!("day offset {} out of range", offset)))
    }

    /// Fetch one day from the source and overwrite its ledger records.
    ///
    /// Nothing is written unless the fetch succeeded, and the day is written
    /// as a single batch.
    pub async fn sync_day(&self, offset: i64) -> AppResult<Day> {
        let date = self.date_for_offset(offset)?;
        let facts = self.source.get_for_day(date).await?;
        let day = day_from_date(date);

        let records: Vec<(String, AccountedTime)> = facts
            .into_iter()
            .map(|f| {
                (
                    f.last_name,
                    AccountedTime::new(f.work_minutes, f.overtime_minutes),
                )
            })
            .collect();

        self.ledger.add_or_update_day(day, &records)?;
        debug!(day, %date, users = records.len(), "day synchronized");
        Ok(day)
    }

    /// Re-sync today's ledger records, then rebuild and publish the snapshot.
    pub async fn refresh_today(&self) -> AppResult<()> {
        self.sync_day(0).await?;

        let facts = self.source.get_today().await?;
        let rows = build_today_rows(&self.roster, &facts);
        let users = rows.len();
        self.snapshot.publish(rows, self.clock.now());

        debug!(users, "today snapshot published");
        Ok(())
    }

    /// Refresh today, then sync offsets `0, -1, .., -(days - 1)` in order.
    ///
    /// Stops at the first error; days already written stay written.
    pub async fn backfill(&self, days: u32) -> AppResult<usize> {
        self.refresh_today().await?;

        let mut synced = 0;
        for offset in 0..i64::from(days) {
            self.sync_day(-offset).await?;
            synced += 1;
        }

        info!(days = synced, "backfill completed");
        // the days are stored; a missing log line must not turn that into an error
        if let Err(e) = self.ledger.audit(
            "backfill",
            &format!("{} days", synced),
            "Backfill from fact source completed",
        ) {
            warn!(days = synced, "backfill not recorded in the internal log: {e}");
        }
        Ok(synced)
    }
}
