#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use rtimeledger::core::today::TodaySnapshot;
use rtimeledger::ledger::MemoryLedger;
use rtimeledger::models::roster::{RosterEntry, WorkShift};
use rtimeledger::source::StaticFactSource;
use rtimeledger::sync::{FixedClock, Synchronizer};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

pub fn rtl() -> Command {
    cargo_bin_cmd!("rtimeledger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimeledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    fs::remove_file(format!("{}-wal", db_path)).ok();
    fs::remove_file(format!("{}-shm", db_path)).ok();
    db_path
}

/// Config file path inside the temp dir, removed if present
pub fn setup_test_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimeledger.conf", name));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry::new("Smith", WorkShift::Morning, false),
        RosterEntry::new("Jones", WorkShift::Morning, true),
        RosterEntry::new("Brown", WorkShift::Evening, true),
    ]
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .earliest()
        .expect("valid local time")
}

/// Synchronizer over in-memory parts, clock frozen at `now`.
pub struct Harness {
    pub ledger: Arc<MemoryLedger>,
    pub source: Arc<StaticFactSource>,
    pub snapshot: Arc<TodaySnapshot>,
    pub sync: Arc<Synchronizer>,
    pub clock: Arc<FixedClock>,
}

pub fn harness(now: DateTime<Local>) -> Harness {
    let ledger = Arc::new(MemoryLedger::new());
    let source = Arc::new(StaticFactSource::new());
    let snapshot = Arc::new(TodaySnapshot::new());
    let clock = Arc::new(FixedClock(now));
    let sync = Arc::new(Synchronizer::new(
        ledger.clone(),
        source.clone(),
        Arc::new(roster()),
        snapshot.clone(),
        clock.clone(),
    ));

    Harness {
        ledger,
        source,
        snapshot,
        sync,
        clock,
    }
}
