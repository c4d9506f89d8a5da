//! Persisted per-user accounted time and the workday override set.
//!
//! All writes from the rest of the crate go through [`Ledger`]. Two
//! implementations exist: [`SqliteLedger`] for production and
//! [`MemoryLedger`] for tests.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryLedger;
pub use sqlite::SqliteLedger;

use crate::errors::{AppError, AppResult};
use crate::models::Day;
use crate::models::accounted::{AccountedTime, AccountedTimeRecord};
use std::collections::BTreeSet;

pub trait Ledger: Send + Sync {
    /// Insert only if nothing is stored for (user, day). First writer wins.
    fn add_accounted_time(
        &self,
        last_name: &str,
        day: Day,
        work: i64,
        overtime: i64,
    ) -> AppResult<()>;

    /// Insert or overwrite the record for (user, day). Latest writer wins.
    fn add_or_update_accounted_time(
        &self,
        last_name: &str,
        day: Day,
        work: i64,
        overtime: i64,
    ) -> AppResult<()>;

    /// Upsert every record of one day. Implementations backed by a real
    /// store apply the whole batch or nothing.
    fn add_or_update_day(&self, day: Day, records: &[(String, AccountedTime)]) -> AppResult<()> {
        for (last_name, time) in records {
            self.add_or_update_accounted_time(
                last_name,
                day,
                time.work_minutes,
                time.overtime_minutes,
            )?;
        }
        Ok(())
    }

    /// All records of one day ordered by last name.
    fn get_accounted_time_by_day(&self, day: Day) -> AppResult<Vec<AccountedTimeRecord>>;

    /// Stored minutes for (user, day), `(0, 0)` when absent.
    fn get_accounted_time_by_day_and_lastname(
        &self,
        day: Day,
        last_name: &str,
    ) -> AppResult<AccountedTime>;

    /// Mark `day` as overridden. No-op if it already is.
    fn set_workday_override(&self, day: Day) -> AppResult<()>;

    /// Clear the override of `day`. No-op if there is none.
    fn remove_workday_override(&self, day: Day) -> AppResult<()>;

    /// Set (`overridden`) or clear the override of `day` and append the
    /// matching internal log line. Both happen or neither does.
    fn change_workday_override_logged(
        &self,
        day: Day,
        overridden: bool,
        operation: &str,
        target: &str,
        message: &str,
    ) -> AppResult<()>;

    /// Overridden days in `[start, start + len)`.
    fn get_override_by_day_sequence(&self, start: Day, len: i64) -> AppResult<BTreeSet<Day>>;

    /// Append an operation to the internal log.
    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()>;
}

/// Override keys share one bound: no day before the epoch.
pub fn check_override_day(day: Day) -> AppResult<()> {
    if day < 0 {
        return Err(AppError::Validation(format!("invalid override day '{}'", day)));
    }
    Ok(())
}

pub fn check_day_sequence(start: Day, len: i64) -> AppResult<()> {
    if start < 0 {
        return Err(AppError::Validation(format!("invalid initial day '{}'", start)));
    }
    if len < 1 {
        return Err(AppError::Validation(format!("invalid sequence len '{}'", len)));
    }
    Ok(())
}
