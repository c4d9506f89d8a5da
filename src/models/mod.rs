//! Domain models shared by the ledger, the sync loop and the reports.

pub mod accounted;
pub mod facts;
pub mod grade;
pub mod roster;
pub mod today;
pub mod week;

/// Day number counted from 1970-01-01 (day 0, a Thursday).
pub type Day = i64;
