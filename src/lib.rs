//! rTimeledger library root.
//! Keeps a local ledger of work time accounted in the ticketing system,
//! refreshes it on a schedule and renders weekly and daily summaries.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod overrides;
pub mod service;
pub mod source;
pub mod sync;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => {
            cli::commands::config::handle(&cli.command, cfg, &cli.config_path())
        }
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Serve => cli::commands::serve::handle(cfg).await,
        Commands::Backfill { .. } => cli::commands::backfill::handle(&cli.command, cfg).await,
        Commands::Week { .. } => cli::commands::week::handle(&cli.command, cfg),
        Commands::Today { .. } => cli::commands::today::handle(&cli.command, cfg).await,
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg),
        Commands::Override { .. } => cli::commands::override_day::handle(&cli.command, cfg).await,
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // init must work before any config file exists
    if let Commands::Init = cli.command {
        return cli::commands::init::handle(&cli);
    }

    let mut cfg = Config::load(&cli.config_path())?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg).await
}
