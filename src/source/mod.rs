//! Facts from the ticketing system.
//!
//! [`FactSource`] is the only view the sync loop has of the remote system.
//! [`HttpFactSource`] talks to the reporting endpoint; [`StaticFactSource`]
//! serves canned data and scripted failures.

pub mod fixed;
pub mod http;

pub use fixed::StaticFactSource;
pub use http::HttpFactSource;

use crate::errors::AppResult;
use crate::models::facts::{DayFact, TodayFact};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

#[async_trait]
pub trait FactSource: Send + Sync {
    /// Minutes and ticket counters accounted so far today, per user.
    async fn get_today(&self) -> AppResult<Vec<TodayFact>>;

    /// Work and overtime minutes for `date`, one row per user.
    async fn get_for_day(&self, date: NaiveDate) -> AppResult<Vec<DayFact>>;

    /// Release the connection. Further calls are not expected.
    async fn close(&self) -> AppResult<()>;
}

/// Raw per-day row: minutes split by the article's overtime mark.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkedTimeRow {
    pub last_name: String,
    #[serde(default)]
    pub minutes: i64,
    /// Non-zero when the minutes were booked as overtime.
    #[serde(default)]
    pub overtime_mark: i64,
}

/// Fold marked rows into one (work, overtime) pair per user.
///
/// Rows are grouped by last name regardless of their order; the output keeps
/// the order in which each user first appears.
pub fn merge_marked_rows(rows: &[MarkedTimeRow]) -> Vec<DayFact> {
    let mut out: Vec<DayFact> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.last_name.as_str()).or_insert_with(|| {
            out.push(DayFact::new(&row.last_name, 0, 0));
            out.len() - 1
        });

        if row.overtime_mark == 0 {
            out[slot].work_minutes += row.minutes;
        } else {
            out[slot].overtime_minutes += row.minutes;
        }
    }

    out
}
