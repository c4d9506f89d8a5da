use super::grade::Grade;
use super::roster::WorkShift;
use chrono::{DateTime, Local};
use serde::Serialize;

/// One roster user in the "today" view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayRow {
    pub last_name: String,
    pub work_shift: WorkShift,
    pub time_accounted: i64,
    pub time_grade: Grade,
    pub all_ticket_count: i64,
    pub closed_ticket_count: i64,
    pub open_ticket_count: i64,
    pub last_in_group: bool,
}

/// Immutable "today" view published by the sync loop.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub rows: Vec<TodayRow>,
    /// `None` until the first successful refresh.
    pub captured_at: Option<DateTime<Local>>,
}
