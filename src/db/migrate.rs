//! Schema migrations. Every step is idempotent; applied steps are recorded
//! in the `log` table as `migration_applied`.

use rusqlite::{Connection, OptionalExtension, Result};
use tracing::info;

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    info!(version, "migration applied");
    Ok(())
}

/// Per-user per-day accounted minutes. (day, last_name) is unique.
fn create_accounted_time_table(conn: &Connection) -> Result<()> {
    let version = "0001_create_accounted_time";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS accounted_time (
            day              INTEGER NOT NULL,
            last_name        TEXT    NOT NULL,
            work_minutes     INTEGER NOT NULL DEFAULT 0,
            overtime_minutes INTEGER NOT NULL DEFAULT 0,
            updated_at       TEXT    NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (day, last_name)
        );

        CREATE INDEX IF NOT EXISTS idx_accounted_time_name ON accounted_time(last_name);
        "#,
    )?;

    mark_applied(conn, version, "Created accounted_time table")
}

/// Days whose default workday/day-off status is inverted.
fn create_workday_override_table(conn: &Connection) -> Result<()> {
    let version = "0002_create_workday_override";
    if migration_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS workday_override (
            day        INTEGER PRIMARY KEY CHECK(day >= 0),
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    mark_applied(conn, version, "Created workday_override table")
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    create_accounted_time_table(conn)?;
    create_workday_override_table(conn)?;
    Ok(())
}
