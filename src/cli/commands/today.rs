use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::today::TodaySnapshot;
use crate::errors::{AppError, AppResult};
use crate::ledger::SqliteLedger;
use crate::models::today::Snapshot;
use crate::source::{FactSource, HttpFactSource};
use crate::sync::{Synchronizer, SystemClock};
use crate::utils::colors::{color_for_count, color_for_grade, color_for_shift};
use crate::utils::formatting::bold;
use crate::utils::hhmm;
use crate::utils::table::{Cell, Column, Table};
use std::sync::Arc;

/// Handle the `today` command: refresh once and print the snapshot.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Today { json } = cmd {
        let ledger = Arc::new(SqliteLedger::open(&cfg.database)?);
        let source = Arc::new(HttpFactSource::new(&cfg.source, &cfg.roster)?);
        let snapshot = Arc::new(TodaySnapshot::new());
        let sync = Synchronizer::new(
            ledger,
            source.clone(),
            Arc::new(cfg.roster.clone()),
            Arc::clone(&snapshot),
            Arc::new(SystemClock),
        );

        let result = sync.refresh_today().await;
        source.close().await?;
        result?;

        let current = snapshot.get();
        if *json {
            let out = serde_json::to_string_pretty(current.as_ref())
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            print_today(&current);
        }
    }

    Ok(())
}

fn print_today(snapshot: &Snapshot) {
    let captured = snapshot
        .captured_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "--".to_string());
    println!("{} {}\n", bold("🕘 Today"), captured);

    let mut table = Table::new(vec![
        Column::new("User", 16),
        Column::new("Time", 8),
        Column::new("Tickets", 8),
        Column::new("Closed", 8),
        Column::new("Open", 8),
    ]);

    for row in &snapshot.rows {
        table.add_row(vec![
            Cell::colored(&row.last_name, color_for_shift(row.work_shift)),
            Cell::colored(
                hhmm(row.time_accounted, false),
                color_for_grade(row.time_grade),
            ),
            Cell::colored(
                row.all_ticket_count.to_string(),
                color_for_count(row.all_ticket_count),
            ),
            Cell::colored(
                row.closed_ticket_count.to_string(),
                color_for_count(row.closed_ticket_count),
            ),
            Cell::colored(
                row.open_ticket_count.to_string(),
                color_for_count(row.open_ticket_count),
            ),
        ]);

        if row.last_in_group {
            table.add_separator();
        }
    }

    print!("{}", table.render());
}
