use super::Day;
use serde::Serialize;

/// Minutes accounted by one user on one day.
///
/// A missing ledger record reads back as `AccountedTime::default()`, so
/// "nothing stored" and "zero minutes" are indistinguishable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccountedTime {
    pub work_minutes: i64,
    pub overtime_minutes: i64,
}

impl AccountedTime {
    pub fn new(work_minutes: i64, overtime_minutes: i64) -> Self {
        Self {
            work_minutes,
            overtime_minutes,
        }
    }

    pub fn total(&self) -> i64 {
        self.work_minutes + self.overtime_minutes
    }
}

/// One persisted `accounted_time` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountedTimeRecord {
    pub day: Day,
    pub last_name: String,
    pub time: AccountedTime,
}

impl AccountedTimeRecord {
    pub fn new(day: Day, last_name: &str, work_minutes: i64, overtime_minutes: i64) -> Self {
        Self {
            day,
            last_name: last_name.to_string(),
            time: AccountedTime::new(work_minutes, overtime_minutes),
        }
    }
}
