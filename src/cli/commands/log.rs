use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREY, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print: true, limit } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;

        let rows = load_log(&pool.conn, *limit)?;
        if rows.is_empty() {
            println!("{}No log entries.{}", GREY, RESET);
            return Ok(());
        }

        for (date, operation, target, message) in rows {
            println!(
                "{}{:<32}{} {:<20} {:<24} {}",
                GREY, date, RESET, operation, target, message
            );
        }
        println!("{}(last {} entries){}", CYAN, limit, RESET);
    }

    Ok(())
}
