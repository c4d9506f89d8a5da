use rtimeledger::errors::AppError;
use rtimeledger::ledger::{Ledger, MemoryLedger, SqliteLedger};
use rtimeledger::models::accounted::{AccountedTime, AccountedTimeRecord};
use std::collections::BTreeSet;

mod common;
use common::setup_test_db;

fn sqlite(name: &str) -> SqliteLedger {
    let db_path = setup_test_db(name);
    SqliteLedger::open(&db_path).expect("open ledger")
}

/// Every check runs against both implementations.
fn check_both(name: &str, check: impl Fn(&dyn Ledger)) {
    let memory: &dyn Ledger = &MemoryLedger::new();
    check(memory);

    let on_disk: &dyn Ledger = &sqlite(name);
    check(on_disk);
}

#[test]
fn test_add_keeps_first_value() {
    check_both("ledger_add_first", |ledger| {
        ledger.add_accounted_time("Smith", 19858, 10, 0).unwrap();
        ledger.add_accounted_time("Smith", 19858, 99, 5).unwrap();

        let stored = ledger
            .get_accounted_time_by_day_and_lastname(19858, "Smith")
            .unwrap();
        assert_eq!(stored, AccountedTime::new(10, 0));
    });
}

#[test]
fn test_upsert_keeps_latest_value() {
    check_both("ledger_upsert_latest", |ledger| {
        ledger
            .add_or_update_accounted_time("Smith", 19858, 10, 0)
            .unwrap();
        ledger
            .add_or_update_accounted_time("Smith", 19858, 99, 5)
            .unwrap();

        let stored = ledger
            .get_accounted_time_by_day_and_lastname(19858, "Smith")
            .unwrap();
        assert_eq!(stored, AccountedTime::new(99, 5));
        assert_eq!(ledger.get_accounted_time_by_day(19858).unwrap().len(), 1);
    });
}

#[test]
fn test_missing_record_reads_as_zero() {
    check_both("ledger_missing_zero", |ledger| {
        let stored = ledger
            .get_accounted_time_by_day_and_lastname(19858, "Nobody")
            .unwrap();
        assert_eq!(stored, AccountedTime::default());
        assert!(ledger.get_accounted_time_by_day(19858).unwrap().is_empty());
    });
}

#[test]
fn test_records_by_day_are_ordered_by_name() {
    check_both("ledger_by_day_order", |ledger| {
        ledger.add_accounted_time("Smith", 19858, 300, 0).unwrap();
        ledger.add_accounted_time("Brown", 19858, 200, 30).unwrap();
        ledger.add_accounted_time("Jones", 19858, 100, 0).unwrap();
        ledger.add_accounted_time("Jones", 19859, 400, 0).unwrap();

        let records = ledger.get_accounted_time_by_day(19858).unwrap();
        assert_eq!(
            records,
            vec![
                AccountedTimeRecord::new(19858, "Brown", 200, 30),
                AccountedTimeRecord::new(19858, "Jones", 100, 0),
                AccountedTimeRecord::new(19858, "Smith", 300, 0),
            ]
        );
    });
}

#[test]
fn test_upsert_whole_day() {
    check_both("ledger_upsert_day", |ledger| {
        ledger.add_accounted_time("Smith", 19858, 1, 1).unwrap();

        let batch = vec![
            ("Smith".to_string(), AccountedTime::new(480, 0)),
            ("Jones".to_string(), AccountedTime::new(420, 60)),
        ];
        ledger.add_or_update_day(19858, &batch).unwrap();

        let records = ledger.get_accounted_time_by_day(19858).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            ledger
                .get_accounted_time_by_day_and_lastname(19858, "Smith")
                .unwrap(),
            AccountedTime::new(480, 0)
        );
    });
}

#[test]
fn test_sqlite_day_batch_is_all_or_nothing() {
    let db_path = setup_test_db("ledger_day_batch_rollback");
    let ledger = SqliteLedger::open(&db_path).unwrap();
    ledger.add_accounted_time("Smith", 19858, 1, 1).unwrap();

    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute_batch(
            "CREATE TRIGGER reject_bad BEFORE INSERT ON accounted_time
             WHEN NEW.last_name = 'Bad'
             BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
        )
        .unwrap();

    let batch = vec![
        ("Smith".to_string(), AccountedTime::new(480, 0)),
        ("Bad".to_string(), AccountedTime::new(420, 60)),
        ("Jones".to_string(), AccountedTime::new(300, 0)),
    ];
    assert!(ledger.add_or_update_day(19858, &batch).is_err());

    // the earlier row keeps its value and nothing from the batch is left
    assert_eq!(
        ledger.get_accounted_time_by_day(19858).unwrap(),
        vec![AccountedTimeRecord {
            day: 19858,
            last_name: "Smith".to_string(),
            time: AccountedTime::new(1, 1),
        }]
    );
}

#[test]
fn test_override_set_and_remove_are_idempotent() {
    check_both("ledger_override_idem", |ledger| {
        ledger.set_workday_override(19860).unwrap();
        ledger.set_workday_override(19860).unwrap();
        ledger.set_workday_override(19862).unwrap();

        let found = ledger.get_override_by_day_sequence(19856, 7).unwrap();
        assert_eq!(found, BTreeSet::from([19860, 19862]));

        ledger.remove_workday_override(19860).unwrap();
        ledger.remove_workday_override(19860).unwrap();
        ledger.remove_workday_override(19999).unwrap();

        let found = ledger.get_override_by_day_sequence(19856, 7).unwrap();
        assert_eq!(found, BTreeSet::from([19862]));
    });
}

#[test]
fn test_override_range_is_half_open() {
    check_both("ledger_override_range", |ledger| {
        for day in [9, 10, 16, 17] {
            ledger.set_workday_override(day).unwrap();
        }
        let found = ledger.get_override_by_day_sequence(10, 7).unwrap();
        assert_eq!(found, BTreeSet::from([10, 16]));
    });
}

#[test]
fn test_override_bounds_are_validated() {
    check_both("ledger_override_bounds", |ledger| {
        assert!(matches!(
            ledger.get_override_by_day_sequence(-1, 7),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            ledger.get_override_by_day_sequence(10, 0),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            ledger.set_workday_override(-1),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            ledger.remove_workday_override(-5),
            Err(AppError::Validation(_))
        ));

        // day 0 is a valid key
        ledger.set_workday_override(0).unwrap();
        assert_eq!(
            ledger.get_override_by_day_sequence(0, 1).unwrap(),
            BTreeSet::from([0])
        );
    });
}

#[test]
fn test_sqlite_ledger_survives_reopen() {
    let db_path = setup_test_db("ledger_reopen");
    {
        let ledger = SqliteLedger::open(&db_path).unwrap();
        ledger.add_accounted_time("Smith", 19858, 250, 15).unwrap();
        ledger.set_workday_override(19858).unwrap();
    }

    let ledger = SqliteLedger::open(&db_path).unwrap();
    assert_eq!(
        ledger
            .get_accounted_time_by_day_and_lastname(19858, "Smith")
            .unwrap(),
        AccountedTime::new(250, 15)
    );
    assert!(
        ledger
            .get_override_by_day_sequence(19858, 1)
            .unwrap()
            .contains(&19858)
    );
}

#[test]
fn test_memory_ledger_write_failure() {
    let ledger = MemoryLedger::new();
    ledger.fail_writes(true);
    assert!(ledger.add_accounted_time("Smith", 1, 1, 1).is_err());
    assert!(ledger.set_workday_override(1).is_err());

    ledger.fail_writes(false);
    ledger.add_accounted_time("Smith", 1, 1, 1).unwrap();
    assert_eq!(ledger.days(), BTreeSet::from([1]));
}
