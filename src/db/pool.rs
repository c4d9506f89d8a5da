//! SQLite connection wrapper (lightweight for CLI usage).

use crate::utils::path::expand_tilde;
use rusqlite::{Connection, Result};

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = open_connection(path)?;
        Ok(Self { conn })
    }
}

/// Open the database file, expanding a leading `~/`.
pub fn open_connection(path: &str) -> Result<Connection> {
    let conn = Connection::open(expand_tilde(path))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}
