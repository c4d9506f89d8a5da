use crate::core::calendar::format_day;
use crate::db::pool::DbPool;
use crate::models::Day;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

/// Counters shown by `db --info`.
#[derive(Debug, Default)]
pub struct DbInfo {
    pub file_size: u64,
    pub accounted_rows: i64,
    pub user_count: i64,
    pub override_count: i64,
    pub first_day: Option<Day>,
    pub last_day: Option<Day>,
}

pub fn collect_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<DbInfo> {
    let conn = &pool.conn;

    let accounted_rows: i64 =
        conn.query_row("SELECT COUNT(*) FROM accounted_time", [], |row| row.get(0))?;
    let user_count: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT last_name) FROM accounted_time",
        [],
        |row| row.get(0),
    )?;
    let override_count: i64 =
        conn.query_row("SELECT COUNT(*) FROM workday_override", [], |row| row.get(0))?;

    let first_day: Option<Day> = conn
        .query_row("SELECT MIN(day) FROM accounted_time", [], |row| row.get(0))
        .optional()?
        .flatten();
    let last_day: Option<Day> = conn
        .query_row("SELECT MAX(day) FROM accounted_time", [], |row| row.get(0))
        .optional()?
        .flatten();

    Ok(DbInfo {
        file_size: fs::metadata(db_path).map(|m| m.len()).unwrap_or(0),
        accounted_rows,
        user_count,
        override_count,
        first_day,
        last_day,
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    let info = collect_db_info(pool, db_path)?;
    println!();

    let file_mb = (info.file_size as f64) / (1024.0 * 1024.0);
    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    println!(
        "{}• Accounted rows:{} {}{}{}",
        CYAN, RESET, GREEN, info.accounted_rows, RESET
    );
    println!("{}• Users:{} {}", CYAN, RESET, info.user_count);
    println!("{}• Overrides:{} {}", CYAN, RESET, info.override_count);

    let fmt = |d: Option<Day>| match d {
        Some(day) => format_day(day),
        None => format!("{GREY}--{RESET}"),
    };

    println!("{}• Day range:{}", CYAN, RESET);
    println!("    from: {}", fmt(info.first_day));
    println!("    to:   {}", fmt(info.last_day));

    println!();
    Ok(())
}
