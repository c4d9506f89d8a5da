use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle `db --migrate | --check | --vacuum | --info`. Flags combine and run
/// in that order.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    if !(*migrate || *check || *vacuum || *show_info) {
        warning("Nothing to do: pass --migrate, --check, --vacuum or --info");
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;

    // every other step needs the current schema
    init_db(&pool.conn)?;
    if *migrate {
        success("Schema is up to date.");
    }

    if *check {
        info("Running integrity check…");
        let verdict: String = pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

        if verdict == "ok" {
            success("Integrity check passed.");
        } else {
            warning(format!("Integrity check failed: {}", verdict));
        }
    }

    if *vacuum {
        pool.conn.execute_batch("VACUUM;")?;
        if let Err(e) = ttlog(&pool.conn, "vacuum", &cfg.database, "Database compacted") {
            warning(format!("Failed to write internal log: {}", e));
        }
        success("Vacuum completed.");
    }

    if *show_info {
        stats::print_db_info(&pool, &cfg.database)?;
    }

    Ok(())
}
