use rtimeledger::config::Config;
use rtimeledger::errors::AppError;
use rtimeledger::models::roster::WorkShift;
use std::fs;
use std::path::Path;
use std::time::Duration;

mod common;
use common::setup_test_config;

const MINIMAL: &str = r#"
database: /tmp/ledger.sqlite
source:
  base_url: http://reports.local/otrs
roster:
  - last_name: Smith
    work_shift: morning
  - last_name: Jones
    work_shift: evening
    last_in_group: true
"#;

#[test]
fn test_minimal_config_gets_defaults() {
    let cfg = Config::from_yaml(MINIMAL).unwrap();

    assert_eq!(cfg.source.timeout_secs, 30);
    assert!(cfg.source.api_token.is_none());
    assert_eq!(cfg.sync.interval(), Duration::from_secs(15 * 60));
    assert_eq!(cfg.sync.backfill_days, 20);
    assert_eq!(cfg.sync.retry_attempts, 5);
    assert!(cfg.sync.finalize_daily);
    assert_eq!(cfg.overrides.queue_capacity, 100);
    assert_eq!(cfg.overrides.send_timeout(), Duration::from_secs(5));

    assert_eq!(cfg.roster.len(), 2);
    assert_eq!(cfg.roster[1].work_shift, WorkShift::Evening);
    assert!(!cfg.roster[0].last_in_group);
    assert!(cfg.roster[1].last_in_group);
}

#[test]
fn test_invalid_configs_are_rejected() {
    let cases = [
        MINIMAL.replace("database: /tmp/ledger.sqlite", "database: ''"),
        MINIMAL.replace("http://reports.local/otrs", "''"),
        MINIMAL.replace("- last_name: Jones", "- last_name: Smith"),
        MINIMAL.replace("work_shift: evening", "work_shift: night"),
        format!("{MINIMAL}sync:\n  interval_minutes: 0\n"),
        format!("{MINIMAL}sync:\n  retry_initial_secs: 600\n  retry_max_secs: 60\n"),
        format!("{MINIMAL}overrides:\n  queue_capacity: 0\n"),
        "database: x\nsource:\n  base_url: y\nroster: []\n".to_string(),
        "not: [valid".to_string(),
    ];

    for yaml in &cases {
        assert!(
            matches!(Config::from_yaml(yaml), Err(AppError::Config(_))),
            "accepted:\n{yaml}"
        );
    }
}

#[test]
fn test_missing_file_fails_closed() {
    let err = Config::load(Path::new("/nonexistent/dir/rtimeledger.conf")).unwrap_err();
    assert!(matches!(err, AppError::ConfigLoad(_)));
}

#[test]
fn test_default_config_is_valid() {
    Config::default().validate().unwrap();
}

#[test]
fn test_init_all_keeps_existing_file() {
    let path = setup_test_config("config_init_keep");
    let db = setup_test_config("config_init_keep_db");

    let created = Config::init_all(Path::new(&path), Some(db.clone())).unwrap();
    assert_eq!(created.database, db);

    let loaded = Config::load(Path::new(&path)).unwrap();
    assert_eq!(loaded.database, db);

    fs::write(&path, MINIMAL).unwrap();
    let again = Config::init_all(Path::new(&path), None).unwrap();
    assert_eq!(again.database, "/tmp/ledger.sqlite");
    assert_eq!(fs::read_to_string(&path).unwrap(), MINIMAL);
}
