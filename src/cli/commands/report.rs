use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::{format_day, parse_override_date};
use crate::errors::AppResult;
use crate::ledger::{Ledger, SqliteLedger};
use crate::utils::colors::{GREY, RESET};
use crate::utils::formatting::{pad_left, pad_right};
use crate::utils::hhmm;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { date } = cmd {
        let day = parse_override_date(date)?;
        let ledger = SqliteLedger::open(&cfg.database)?;
        let records = ledger.get_accounted_time_by_day(day)?;

        println!("📊 Ledger for {} (day {})\n", format_day(day), day);

        if records.is_empty() {
            println!("{}No records for this day.{}", GREY, RESET);
            return Ok(());
        }

        println!(
            "{} {} {}",
            pad_right("User", 16),
            pad_left("Work", 8),
            pad_left("Overtime", 10)
        );
        for r in &records {
            println!(
                "{} {} {}",
                pad_right(&r.last_name, 16),
                pad_left(&hhmm(r.time.work_minutes, false), 8),
                pad_left(&hhmm(r.time.overtime_minutes, false), 10)
            );
        }
    }

    Ok(())
}
