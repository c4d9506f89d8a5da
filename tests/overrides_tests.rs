use rtimeledger::core::calendar::parse_override_date;
use rtimeledger::errors::AppError;
use rtimeledger::ledger::{Ledger, MemoryLedger, SqliteLedger};
use rtimeledger::overrides::{OverrideAction, OverrideQueue, OverrideWorker, apply_override};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

mod common;
use common::setup_test_db;

fn day(s: &str) -> i64 {
    parse_override_date(s).unwrap()
}

#[test]
fn test_apply_override_writes_and_audits() {
    let ledger = MemoryLedger::new();

    let d = apply_override(&ledger, OverrideAction::Add, "2024.05.14").unwrap();
    assert_eq!(d, day("2024.05.14"));
    assert!(ledger.get_override_by_day_sequence(d, 1).unwrap().contains(&d));

    apply_override(&ledger, OverrideAction::Remove, "2024.05.14").unwrap();
    assert!(ledger.get_override_by_day_sequence(d, 1).unwrap().is_empty());

    let ops: Vec<String> = ledger
        .audit_entries()
        .into_iter()
        .map(|(op, target, _)| format!("{op} {target}"))
        .collect();
    assert_eq!(
        ops,
        vec!["override_add 2024.05.14", "override_remove 2024.05.14"]
    );
}

#[test]
fn test_apply_override_rejects_bad_dates() {
    let ledger = MemoryLedger::new();

    assert!(matches!(
        apply_override(&ledger, OverrideAction::Add, "14/05/2024"),
        Err(AppError::InvalidDate(_))
    ));
    assert!(matches!(
        apply_override(&ledger, OverrideAction::Add, "1969.12.31"),
        Err(AppError::Validation(_))
    ));
    assert!(ledger.audit_entries().is_empty());
}

#[test]
fn test_apply_override_is_undone_when_log_write_fails() {
    let db_path = setup_test_db("override_log_write_fails");
    let ledger = SqliteLedger::open(&db_path).unwrap();
    let kept = day("2024.05.18");
    ledger.set_workday_override(kept).unwrap();

    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute_batch("DROP TABLE log;")
        .unwrap();

    assert!(apply_override(&ledger, OverrideAction::Add, "2024.05.14").is_err());
    assert!(
        ledger
            .get_override_by_day_sequence(day("2024.05.14"), 1)
            .unwrap()
            .is_empty()
    );

    assert!(apply_override(&ledger, OverrideAction::Remove, "2024.05.18").is_err());
    assert!(ledger.get_override_by_day_sequence(kept, 1).unwrap().contains(&kept));
}

#[test]
fn test_apply_override_on_read_only_ledger_leaves_no_trace() {
    let ledger = MemoryLedger::new();
    ledger.fail_writes(true);

    assert!(apply_override(&ledger, OverrideAction::Add, "2024.05.14").is_err());
    assert!(ledger.audit_entries().is_empty());
    assert!(
        ledger
            .get_override_by_day_sequence(day("2024.05.14"), 1)
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_worker_reports_failed_log_write_to_submitter() {
    let db_path = setup_test_db("override_worker_log_write_fails");
    let ledger = Arc::new(SqliteLedger::open(&db_path).unwrap());
    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute_batch("DROP TABLE log;")
        .unwrap();

    let (queue, rx) = OverrideQueue::channel(4, Duration::from_secs(1));
    let (_tx, shutdown) = watch::channel(false);
    let worker = tokio::spawn(OverrideWorker::new(ledger.clone(), rx).run(shutdown));

    let reply = queue.submit(OverrideAction::Add, "2024.05.14").await;
    assert!(reply.is_err());

    drop(queue);
    worker.await.unwrap();
    assert!(
        ledger
            .get_override_by_day_sequence(day("2024.05.14"), 1)
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_worker_applies_in_receipt_order() {
    let ledger = Arc::new(MemoryLedger::new());
    let (queue, rx) = OverrideQueue::channel(16, Duration::from_secs(1));
    let (_tx, shutdown) = watch::channel(false);
    let worker = tokio::spawn(OverrideWorker::new(ledger.clone(), rx).run(shutdown));

    queue.add("2024.05.14").await.unwrap();
    queue.remove("2024.05.14").await.unwrap();
    queue.add("2024.05.18").await.unwrap();
    queue.remove("2024.05.20").await.unwrap();
    queue.add("2024.05.14").await.unwrap();
    queue.remove("2024.05.18").await.unwrap();
    drop(queue);

    assert_eq!(worker.await.unwrap(), 6);

    let found = ledger
        .get_override_by_day_sequence(day("2024.05.13"), 7)
        .unwrap();
    assert_eq!(found, BTreeSet::from([day("2024.05.14")]));
    assert_eq!(ledger.audit_entries().len(), 6);
}

#[tokio::test]
async fn test_submit_reports_worker_result() {
    let ledger = Arc::new(MemoryLedger::new());
    let (queue, rx) = OverrideQueue::channel(4, Duration::from_secs(1));
    let (tx, shutdown) = watch::channel(false);
    let worker = tokio::spawn(OverrideWorker::new(ledger.clone(), rx).run(shutdown));

    let d = queue
        .submit(OverrideAction::Add, "2024.05.18")
        .await
        .unwrap();
    assert_eq!(d, day("2024.05.18"));

    let err = queue
        .submit(OverrideAction::Remove, "2024-05-18")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidDate(_)));

    tx.send(true).unwrap();
    assert_eq!(worker.await.unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_full_queue_times_out() {
    let (queue, _rx) = OverrideQueue::channel(1, Duration::from_millis(200));

    queue.add("2024.05.14").await.unwrap();
    let err = queue.add("2024.05.15").await.unwrap_err();
    assert!(matches!(err, AppError::QueueFull(_)));
}

#[tokio::test]
async fn test_closed_queue_is_reported() {
    let (queue, rx) = OverrideQueue::channel(1, Duration::from_millis(200));
    drop(rx);

    assert!(matches!(
        queue.add("2024.05.14").await,
        Err(AppError::QueueClosed)
    ));
}

#[tokio::test]
async fn test_worker_stops_on_shutdown() {
    let ledger = Arc::new(MemoryLedger::new());
    let (queue, rx) = OverrideQueue::channel(4, Duration::from_secs(1));
    let (tx, shutdown) = watch::channel(false);
    let worker = tokio::spawn(OverrideWorker::new(ledger, rx).run(shutdown));

    tx.send(true).unwrap();
    assert_eq!(worker.await.unwrap(), 0);

    // nobody consumes any more
    assert!(queue.add("2024.05.14").await.is_err());
}
