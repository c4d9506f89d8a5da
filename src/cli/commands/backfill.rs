use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::today::TodaySnapshot;
use crate::errors::AppResult;
use crate::ledger::SqliteLedger;
use crate::source::{FactSource, HttpFactSource};
use crate::sync::{Synchronizer, SystemClock};
use crate::ui::messages::{info, success};
use std::sync::Arc;

/// Handle the `backfill` command: one pass over the trailing window.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backfill { days } = cmd {
        let days = days.unwrap_or(cfg.sync.backfill_days);

        let ledger = Arc::new(SqliteLedger::open(&cfg.database)?);
        let source = Arc::new(HttpFactSource::new(&cfg.source, &cfg.roster)?);
        let sync = Synchronizer::new(
            ledger,
            source.clone(),
            Arc::new(cfg.roster.clone()),
            Arc::new(TodaySnapshot::new()),
            Arc::new(SystemClock),
        );

        info(format!("Backfilling {} days…", days));
        let result = sync.backfill(days).await;
        source.close().await?;

        let synced = result?;
        success(format!("{} days synchronized.", synced));
    }

    Ok(())
}
