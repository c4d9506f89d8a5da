//! Workday calendar: day numbers, week lists and override classification.
//!
//! By default Monday..Friday are workdays and Saturday/Sunday days off.
//! An override inverts the default for one day.

use crate::errors::{AppError, AppResult};
use crate::models::Day;
use crate::models::week::Workday;
use chrono::{Local, NaiveDate, Offset};
use std::collections::BTreeSet;

pub const SECONDS_PER_DAY: i64 = 60 * 60 * 24;

/// Week positions below this value are workdays by default.
const DEFAULT_WORKDAYS_PER_WEEK: usize = 5;

/// Day 0 (1970-01-01) is a Thursday, week position 3.
const EPOCH_WEEKDAY_OFFSET: i64 = 3;

/// Date format accepted for override commands.
pub const OVERRIDE_DATE_FORMAT: &str = "%Y.%m.%d";

/// Resolve workday status for one Monday..Sunday week.
///
/// `days` must be in week-position order; nothing checks it.
pub fn classify_week(days: &[Day; 7], overrides: &BTreeSet<Day>) -> [Workday; 7] {
    let mut week = [Workday {
        day: 0,
        is_workday: false,
    }; 7];

    for (i, day) in days.iter().enumerate() {
        let default_workday = i < DEFAULT_WORKDAYS_PER_WEEK;
        week[i] = Workday {
            day: *day,
            is_workday: default_workday != overrides.contains(day),
        };
    }

    week
}

/// Monday..Sunday day numbers of the current local week shifted by `week_offset`.
pub fn week_day_list(week_offset: i64) -> [Day; 7] {
    let now = Local::now();
    let utc_offset = now.offset().fix().local_minus_utc() as i64;
    week_day_list_at(now.timestamp(), utc_offset, week_offset)
}

/// Clock-independent form of [`week_day_list`].
///
/// The arithmetic matches the day numbers already stored on disk:
/// `day = floor((now + offset) / 86400)`, `week = floor((day + 3) / 7)`,
/// first day of the week `= week * 7 - 3`.
pub fn week_day_list_at(now_unix: i64, utc_offset_secs: i64, week_offset: i64) -> [Day; 7] {
    let current_day = (now_unix + utc_offset_secs).div_euclid(SECONDS_PER_DAY);
    let current_week = (current_day + EPOCH_WEEKDAY_OFFSET).div_euclid(7) + week_offset;
    let first_day = current_week * 7 - EPOCH_WEEKDAY_OFFSET;

    let mut days = [0; 7];
    for (i, d) in days.iter_mut().enumerate() {
        *d = first_day + i as i64;
    }
    days
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

pub fn day_from_date(date: NaiveDate) -> Day {
    (date - epoch()).num_days()
}

pub fn date_from_day(day: Day) -> Option<NaiveDate> {
    chrono::TimeDelta::try_days(day).and_then(|delta| epoch().checked_add_signed(delta))
}

/// Parse a `YYYY.MM.DD` string as UTC midnight and return its day number.
pub fn parse_override_date(input: &str) -> AppResult<Day> {
    let date = NaiveDate::parse_from_str(input.trim(), OVERRIDE_DATE_FORMAT)
        .map_err(|_| AppError::InvalidDate(input.to_string()))?;
    Ok(day_from_date(date))
}

/// Format a day number back into the override date form.
pub fn format_day(day: Day) -> String {
    match date_from_day(day) {
        Some(d) => d.format(OVERRIDE_DATE_FORMAT).to_string(),
        None => format!("day {}", day),
    }
}

/// Short weekday label for a week position (0 = Monday).
pub fn weekday_label(position: usize) -> &'static str {
    const LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    LABELS.get(position).copied().unwrap_or("?")
}
