//! SQLite-backed ledger.

use super::{Ledger, check_day_sequence, check_override_day};
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::open_connection;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::Day;
use crate::models::accounted::{AccountedTime, AccountedTimeRecord};
use rusqlite::Connection;
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Serializes all access through one connection.
pub struct SqliteLedger {
    conn: Mutex<Connection>,
}

impl SqliteLedger {
    /// Open (or create) the database file and run pending migrations.
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = open_connection(path)?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> AppResult<Self> {
        init_db(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Ledger for SqliteLedger {
    fn add_accounted_time(
        &self,
        last_name: &str,
        day: Day,
        work: i64,
        overtime: i64,
    ) -> AppResult<()> {
        let inserted = queries::insert_accounted_time(
            &self.conn(),
            last_name,
            day,
            AccountedTime::new(work, overtime),
        )?;
        if inserted == 0 {
            debug!(day, last_name, "accounted time already stored, insert skipped");
        }
        Ok(())
    }

    fn add_or_update_accounted_time(
        &self,
        last_name: &str,
        day: Day,
        work: i64,
        overtime: i64,
    ) -> AppResult<()> {
        queries::upsert_accounted_time(
            &self.conn(),
            last_name,
            day,
            AccountedTime::new(work, overtime),
        )
    }

    fn add_or_update_day(&self, day: Day, records: &[(String, AccountedTime)]) -> AppResult<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        for (last_name, time) in records {
            queries::upsert_accounted_time(&tx, last_name, day, *time)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn get_accounted_time_by_day(&self, day: Day) -> AppResult<Vec<AccountedTimeRecord>> {
        queries::load_accounted_time_by_day(&self.conn(), day)
    }

    fn get_accounted_time_by_day_and_lastname(
        &self,
        day: Day,
        last_name: &str,
    ) -> AppResult<AccountedTime> {
        Ok(queries::load_accounted_time(&self.conn(), day, last_name)?.unwrap_or_default())
    }

    fn set_workday_override(&self, day: Day) -> AppResult<()> {
        check_override_day(day)?;
        queries::insert_override(&self.conn(), day)?;
        Ok(())
    }

    fn remove_workday_override(&self, day: Day) -> AppResult<()> {
        check_override_day(day)?;
        queries::delete_override(&self.conn(), day)?;
        Ok(())
    }

    fn change_workday_override_logged(
        &self,
        day: Day,
        overridden: bool,
        operation: &str,
        target: &str,
        message: &str,
    ) -> AppResult<()> {
        check_override_day(day)?;
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        if overridden {
            queries::insert_override(&tx, day)?;
        } else {
            queries::delete_override(&tx, day)?;
        }
        ttlog(&tx, operation, target, message)?;
        tx.commit()?;
        Ok(())
    }

    fn get_override_by_day_sequence(&self, start: Day, len: i64) -> AppResult<BTreeSet<Day>> {
        check_day_sequence(start, len)?;
        queries::load_overrides_in_range(&self.conn(), start, start.saturating_add(len))
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.conn(), operation, target, message)
    }
}
