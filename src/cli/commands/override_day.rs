use crate::cli::parser::{Commands, OverrideCommands};
use crate::config::Config;
use crate::core::calendar::format_day;
use crate::errors::AppResult;
use crate::ledger::SqliteLedger;
use crate::overrides::{OverrideAction, OverrideQueue, OverrideWorker};
use crate::ui::messages::success;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::error;

/// Handle `override add|remove`: the command goes through the same queue and
/// worker the service uses.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Override { action } = cmd {
        let (action, date) = match action {
            OverrideCommands::Add { date } => (OverrideAction::Add, date),
            OverrideCommands::Remove { date } => (OverrideAction::Remove, date),
        };

        let ledger = Arc::new(SqliteLedger::open(&cfg.database)?);
        let (queue, rx) =
            OverrideQueue::channel(cfg.overrides.queue_capacity, cfg.overrides.send_timeout());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let worker = tokio::spawn(OverrideWorker::new(ledger, rx).run(shutdown_rx));

        let result = queue.submit(action, date).await;

        let _ = shutdown_tx.send(true);
        drop(queue);
        if let Err(e) = worker.await {
            error!(task = "override-worker", "task failed: {e}");
        }

        let day = result?;
        match action {
            OverrideAction::Add => success(format!("Override set for {}.", format_day(day))),
            OverrideAction::Remove => success(format!("Override removed for {}.", format_day(day))),
        }
    }

    Ok(())
}
