//! SQL statements behind `SqliteLedger`.

use crate::errors::AppResult;
use crate::models::Day;
use crate::models::accounted::{AccountedTime, AccountedTimeRecord};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::collections::BTreeSet;

fn map_record(row: &Row) -> rusqlite::Result<AccountedTimeRecord> {
    Ok(AccountedTimeRecord {
        day: row.get("day")?,
        last_name: row.get("last_name")?,
        time: AccountedTime {
            work_minutes: row.get("work_minutes")?,
            overtime_minutes: row.get("overtime_minutes")?,
        },
    })
}

/// Insert unless a row for (day, last_name) exists. Returns the inserted row count.
pub fn insert_accounted_time(
    conn: &Connection,
    last_name: &str,
    day: Day,
    time: AccountedTime,
) -> AppResult<usize> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO accounted_time (day, last_name, work_minutes, overtime_minutes)
         VALUES (?1, ?2, ?3, ?4)",
        params![day, last_name, time.work_minutes, time.overtime_minutes],
    )?;
    Ok(n)
}

pub fn upsert_accounted_time(
    conn: &Connection,
    last_name: &str,
    day: Day,
    time: AccountedTime,
) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO accounted_time (day, last_name, work_minutes, overtime_minutes)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(day, last_name) DO UPDATE SET
             work_minutes     = excluded.work_minutes,
             overtime_minutes = excluded.overtime_minutes,
             updated_at       = datetime('now')",
    )?;
    stmt.execute(params![day, last_name, time.work_minutes, time.overtime_minutes])?;
    Ok(())
}

pub fn load_accounted_time_by_day(conn: &Connection, day: Day) -> AppResult<Vec<AccountedTimeRecord>> {
    let mut stmt = conn.prepare(
        "SELECT day, last_name, work_minutes, overtime_minutes
         FROM accounted_time
         WHERE day = ?1
         ORDER BY last_name ASC",
    )?;

    let rows = stmt.query_map([day], map_record)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_accounted_time(
    conn: &Connection,
    day: Day,
    last_name: &str,
) -> AppResult<Option<AccountedTime>> {
    let mut stmt = conn.prepare_cached(
        "SELECT work_minutes, overtime_minutes
         FROM accounted_time
         WHERE day = ?1 AND last_name = ?2",
    )?;

    let time = stmt
        .query_row(params![day, last_name], |row| {
            Ok(AccountedTime {
                work_minutes: row.get(0)?,
                overtime_minutes: row.get(1)?,
            })
        })
        .optional()?;
    Ok(time)
}

pub fn insert_override(conn: &Connection, day: Day) -> AppResult<usize> {
    let n = conn.execute(
        "INSERT OR IGNORE INTO workday_override (day) VALUES (?1)",
        [day],
    )?;
    Ok(n)
}

pub fn delete_override(conn: &Connection, day: Day) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM workday_override WHERE day = ?1", [day])?;
    Ok(n)
}

pub fn load_overrides_in_range(conn: &Connection, start: Day, end: Day) -> AppResult<BTreeSet<Day>> {
    let mut stmt = conn.prepare(
        "SELECT day FROM workday_override
         WHERE day >= ?1 AND day < ?2
         ORDER BY day ASC",
    )?;

    let rows = stmt.query_map([start, end], |row| row.get::<_, Day>(0))?;

    let mut out = BTreeSet::new();
    for r in rows {
        out.insert(r?);
    }
    Ok(out)
}
