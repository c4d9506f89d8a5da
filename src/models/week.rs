use super::Day;
use super::grade::{Grade, HeaderKind};
use super::roster::RosterEntry;
use serde::Serialize;

/// A calendar day with its resolved workday status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Workday {
    pub day: Day,
    pub is_workday: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekCell {
    /// Work minutes for day cells; work + overtime for the total cell.
    pub time: i64,
    pub overtime: i64,
    pub overtime_visible: bool,
    pub grade: Grade,
}

impl Default for WeekCell {
    fn default() -> Self {
        Self {
            time: 0,
            overtime: 0,
            overtime_visible: false,
            grade: Grade::Good,
        }
    }
}

impl WeekCell {
    pub fn total(&self) -> i64 {
        self.time + self.overtime
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRow {
    pub user: RosterEntry,
    /// Index 0 is the week total, 1..=7 are Monday..Sunday.
    pub cells: [WeekCell; 8],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekMatrix {
    pub days: [Workday; 7],
    /// Index 0 is the total column.
    pub header: [HeaderKind; 8],
    pub workday_count: i64,
    pub rows: Vec<WeekRow>,
}
