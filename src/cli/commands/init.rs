use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ledger::{Ledger, SqliteLedger};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let path = cli.config_path();
    let mut cfg = Config::init_all(&path, cli.db.clone())?;
    if let Some(db) = &cli.db {
        cfg.database = db.clone();
    }

    println!("⚙️  Initializing rTimeledger…");
    println!("📄 Config file : {}", path.display());
    println!("🗄️  Database   : {}", &cfg.database);

    let ledger = SqliteLedger::open(&cfg.database)?;

    println!("✅ Database initialized at {}", &cfg.database);

    // internal log is not blocking
    if let Err(e) = ledger.audit(
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &cfg.database),
    ) {
        crate::ui::messages::warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 rTimeledger initialization completed!");
    Ok(())
}
