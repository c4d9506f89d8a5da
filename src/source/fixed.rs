//! Canned fact source for tests and offline runs.

use super::FactSource;
use crate::errors::{AppError, AppResult};
use crate::models::facts::{DayFact, TodayFact};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct State {
    today: Vec<TodayFact>,
    days: HashMap<NaiveDate, Vec<DayFact>>,
    failing_days: BTreeSet<NaiveDate>,
    /// Failures consumed one by one before any call succeeds.
    pending_failures: VecDeque<String>,
    requested_days: Vec<NaiveDate>,
    today_calls: usize,
    closed: bool,
}

#[derive(Debug, Default)]
pub struct StaticFactSource {
    state: Mutex<State>,
}

impl StaticFactSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_today(&self, facts: Vec<TodayFact>) {
        self.state().today = facts;
    }

    pub fn set_day(&self, date: NaiveDate, facts: Vec<DayFact>) {
        self.state().days.insert(date, facts);
    }

    /// Every request for `date` fails.
    pub fn fail_on(&self, date: NaiveDate) {
        self.state().failing_days.insert(date);
    }

    /// The next `count` calls of any kind fail.
    pub fn fail_next(&self, count: usize) {
        let mut state = self.state();
        for i in 0..count {
            state
                .pending_failures
                .push_back(format!("scripted failure #{}", i + 1));
        }
    }

    /// Dates passed to `get_for_day`, in call order.
    pub fn requested_days(&self) -> Vec<NaiveDate> {
        self.state().requested_days.clone()
    }

    pub fn today_calls(&self) -> usize {
        self.state().today_calls
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    fn take_failure(state: &mut State) -> AppResult<()> {
        match state.pending_failures.pop_front() {
            Some(msg) => Err(AppError::Source(msg)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FactSource for StaticFactSource {
    async fn get_today(&self) -> AppResult<Vec<TodayFact>> {
        let mut state = self.state();
        state.today_calls += 1;
        Self::take_failure(&mut state)?;
        Ok(state.today.clone())
    }

    async fn get_for_day(&self, date: NaiveDate) -> AppResult<Vec<DayFact>> {
        let mut state = self.state();
        state.requested_days.push(date);
        Self::take_failure(&mut state)?;
        if state.failing_days.contains(&date) {
            return Err(AppError::Source(format!("no connection while reading {}", date)));
        }
        Ok(state.days.get(&date).cloned().unwrap_or_default())
    }

    async fn close(&self) -> AppResult<()> {
        self.state().closed = true;
        Ok(())
    }
}
