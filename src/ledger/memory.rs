//! In-memory ledger used by tests.

use super::{Ledger, check_day_sequence, check_override_day};
use crate::errors::{AppError, AppResult};
use crate::models::Day;
use crate::models::accounted::{AccountedTime, AccountedTimeRecord};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct State {
    times: BTreeMap<(Day, String), AccountedTime>,
    overrides: BTreeSet<Day>,
    audit: Vec<(String, String, String)>,
    fail_writes: bool,
}

#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: Mutex<State>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make every subsequent write fail with a store error.
    pub fn fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }

    /// Every stored record ordered by (day, last name).
    pub fn records(&self) -> Vec<AccountedTimeRecord> {
        self.state()
            .times
            .iter()
            .map(|((day, name), time)| AccountedTimeRecord {
                day: *day,
                last_name: name.clone(),
                time: *time,
            })
            .collect()
    }

    /// Days that have at least one record.
    pub fn days(&self) -> BTreeSet<Day> {
        self.state().times.keys().map(|(day, _)| *day).collect()
    }

    pub fn audit_entries(&self) -> Vec<(String, String, String)> {
        self.state().audit.clone()
    }

    fn writable(state: &State) -> AppResult<()> {
        if state.fail_writes {
            return Err(AppError::Other("memory ledger is read-only".into()));
        }
        Ok(())
    }
}

impl Ledger for MemoryLedger {
    fn add_accounted_time(
        &self,
        last_name: &str,
        day: Day,
        work: i64,
        overtime: i64,
    ) -> AppResult<()> {
        let mut state = self.state();
        Self::writable(&state)?;
        state
            .times
            .entry((day, last_name.to_string()))
            .or_insert_with(|| AccountedTime::new(work, overtime));
        Ok(())
    }

    fn add_or_update_accounted_time(
        &self,
        last_name: &str,
        day: Day,
        work: i64,
        overtime: i64,
    ) -> AppResult<()> {
        let mut state = self.state();
        Self::writable(&state)?;
        state
            .times
            .insert((day, last_name.to_string()), AccountedTime::new(work, overtime));
        Ok(())
    }

    fn add_or_update_day(&self, day: Day, records: &[(String, AccountedTime)]) -> AppResult<()> {
        // single guard, so the batch is applied as a whole
        let mut state = self.state();
        Self::writable(&state)?;
        for (last_name, time) in records {
            state.times.insert((day, last_name.clone()), *time);
        }
        Ok(())
    }

    fn get_accounted_time_by_day(&self, day: Day) -> AppResult<Vec<AccountedTimeRecord>> {
        Ok(self
            .state()
            .times
            .range((day, String::new())..)
            .take_while(|((d, _), _)| *d == day)
            .map(|((d, name), time)| AccountedTimeRecord {
                day: *d,
                last_name: name.clone(),
                time: *time,
            })
            .collect())
    }

    fn get_accounted_time_by_day_and_lastname(
        &self,
        day: Day,
        last_name: &str,
    ) -> AppResult<AccountedTime> {
        Ok(self
            .state()
            .times
            .get(&(day, last_name.to_string()))
            .copied()
            .unwrap_or_default())
    }

    fn set_workday_override(&self, day: Day) -> AppResult<()> {
        check_override_day(day)?;
        let mut state = self.state();
        Self::writable(&state)?;
        state.overrides.insert(day);
        Ok(())
    }

    fn remove_workday_override(&self, day: Day) -> AppResult<()> {
        check_override_day(day)?;
        let mut state = self.state();
        Self::writable(&state)?;
        state.overrides.remove(&day);
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
        let mut state = self.state();
        Self::writable(&state)?;
        if overridden {
            state.overrides.insert(day);
        } else {
            state.overrides.remove(&day);
        }
        state.audit.push((
            operation.to_string(),
            target.to_string(),
            message.to_string(),
        ));
        Ok(())
    }

    fn get_override_by_day_sequence(&self, start: Day, len: i64) -> AppResult<BTreeSet<Day>> {
        check_day_sequence(start, len)?;
        Ok(self
            .state()
            .overrides
            .range(start..start.saturating_add(len))
            .copied()
            .collect())
    }

    fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        self.state().audit.push((
            operation.to_string(),
            target.to_string(),
            message.to_string(),
        ));
        Ok(())
    }
}
