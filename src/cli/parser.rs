use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for rTimeledger
/// Keeps a local ledger of time accounted in the ticketing system
#[derive(Parser)]
#[command(
    name = "rtimeledger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sync accounted work time from the ticketing system into a local ledger and show weekly summaries",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use this configuration file instead of the default one
    #[arg(global = true, long = "config")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::config_file)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Validate the configuration file")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "limit", default_value_t = 50, help = "Maximum rows to print")]
        limit: usize,
    },

    /// Run the synchronization service until interrupted
    Serve,

    /// Sync the trailing window of days into the ledger once
    Backfill {
        #[arg(long = "days", help = "Number of days, today included (default from config)")]
        days: Option<u32>,
    },

    /// Show the weekly summary from the ledger
    Week {
        #[arg(
            long = "offset",
            default_value_t = 0,
            allow_hyphen_values = true,
            help = "Week offset: 0 = current week, -1 = last week"
        )]
        offset: i64,

        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// Fetch and show today's accounted time and tickets
    Today {
        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// Show ledger records of one day
    Report {
        /// Day to show (YYYY.MM.DD)
        date: String,
    },

    /// Add or remove a workday override
    Override {
        #[command(subcommand)]
        action: OverrideCommands,
    },
}

#[derive(Subcommand)]
pub enum OverrideCommands {
    /// Invert the default workday/day-off status of a day
    Add {
        /// Day to override (YYYY.MM.DD)
        date: String,
    },

    /// Restore the default status of a day
    Remove {
        /// Day to restore (YYYY.MM.DD)
        date: String,
    },
}
