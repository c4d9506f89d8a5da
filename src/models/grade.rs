//! Display classification of accounted minutes.

use serde::Serialize;

/// Below this many minutes a workday is graded `Bad` (4h).
pub const BAD_BELOW_MINUTES: i64 = 240;
/// Below this many minutes a workday is graded `Average` (5h).
pub const AVERAGE_BELOW_MINUTES: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Good,
    Average,
    Bad,
}

impl Grade {
    /// Grade `minutes` against the daily thresholds scaled by `days`.
    pub fn for_minutes(minutes: i64, days: i64) -> Self {
        if minutes < BAD_BELOW_MINUTES * days {
            Grade::Bad
        } else if minutes < AVERAGE_BELOW_MINUTES * days {
            Grade::Average
        } else {
            Grade::Good
        }
    }

    /// Grade of a single day cell. Days off are always `Good`.
    pub fn for_day(minutes: i64, is_workday: bool) -> Self {
        if !is_workday {
            return Grade::Good;
        }
        Self::for_minutes(minutes, 1)
    }

    /// CSS class of the matching grid cell.
    pub fn css_class(&self) -> &'static str {
        match self {
            Grade::Good => "good-grid-col",
            Grade::Average => "average-grid-col",
            Grade::Bad => "bad-grid-col",
        }
    }
}

/// Header cell kind of the week matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderKind {
    Total,
    Workday,
    DayOff,
}

impl HeaderKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            HeaderKind::Total => "themed-grid-col",
            HeaderKind::Workday => "work-day-grid-col",
            HeaderKind::DayOff => "day-off-grid-col",
        }
    }
}
