//! Facts as returned by the ticketing system.

use serde::{Deserialize, Serialize};

/// Per-user aggregate for the current day, including ticket counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayFact {
    pub last_name: String,
    #[serde(default)]
    pub work_minutes: i64,
    #[serde(default)]
    pub overtime_minutes: i64,
    #[serde(default)]
    pub not_closed_ticket_count: i64,
    #[serde(default)]
    pub locked_ticket_count: i64,
    #[serde(default)]
    pub open_ticket_count: i64,
}

/// Per-user accounted minutes for an arbitrary day, one row per user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayFact {
    pub last_name: String,
    pub work_minutes: i64,
    pub overtime_minutes: i64,
}

impl DayFact {
    pub fn new(last_name: &str, work_minutes: i64, overtime_minutes: i64) -> Self {
        Self {
            last_name: last_name.to_string(),
            work_minutes,
            overtime_minutes,
        }
    }
}
