use crate::config::Config;
use crate::errors::AppResult;
use crate::ledger::SqliteLedger;
use crate::service::Service;
use crate::source::HttpFactSource;
use crate::sync::SystemClock;
use crate::ui::messages::{info, success};
use std::sync::Arc;

/// Handle the `serve` command: run the sync loop and the daily finalizer
/// until Ctrl-C.
///
/// The service's read side and override queue are for an embedding
/// front end; this command exposes neither, so its override worker sits
/// idle until shutdown. From the shell, `override` and `week` work on the
/// same database while `serve` runs.
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let ledger = Arc::new(SqliteLedger::open(&cfg.database)?);
    let source = Arc::new(HttpFactSource::new(&cfg.source, &cfg.roster)?);

    let service = Service::start(cfg, ledger, source, Arc::new(SystemClock));
    info(format!(
        "Syncing {} users from {} (Ctrl-C to stop)",
        cfg.roster.len(),
        cfg.source.base_url
    ));

    tokio::signal::ctrl_c().await?;

    service.shutdown().await?;
    success("Service stopped.");
    Ok(())
}
