//! Calendar and report logic. Everything here is pure over its inputs,
//! except `today::TodaySnapshot` which is the published "today" view.

pub mod calendar;
pub mod today;
pub mod week;
