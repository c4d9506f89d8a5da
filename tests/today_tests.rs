use rtimeledger::core::today::{TodaySnapshot, build_today_rows};
use rtimeledger::models::facts::TodayFact;
use rtimeledger::models::grade::Grade;

mod common;
use common::{local, roster};

fn fact(name: &str, work: i64, overtime: i64, not_closed: i64, locked: i64, open: i64) -> TodayFact {
    TodayFact {
        last_name: name.to_string(),
        work_minutes: work,
        overtime_minutes: overtime,
        not_closed_ticket_count: not_closed,
        locked_ticket_count: locked,
        open_ticket_count: open,
    }
}

#[test]
fn test_rows_follow_roster_and_compute_counters() {
    let facts = vec![
        fact("Jones", 200, 50, 1, 4, 7),
        fact("Smith", 310, 0, 2, 5, 3),
        fact("Stranger", 999, 0, 0, 0, 0),
    ];

    let rows = build_today_rows(&roster(), &facts);
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].last_name, "Smith");
    assert_eq!(rows[0].time_accounted, 310);
    assert_eq!(rows[0].time_grade, Grade::Good);
    assert_eq!(rows[0].all_ticket_count, 5);
    assert_eq!(rows[0].closed_ticket_count, 3);
    assert_eq!(rows[0].open_ticket_count, 3);

    assert_eq!(rows[1].last_name, "Jones");
    assert_eq!(rows[1].time_accounted, 250);
    assert_eq!(rows[1].time_grade, Grade::Average);
    assert_eq!(rows[1].closed_ticket_count, 3);
    assert!(rows[1].last_in_group);
}

#[test]
fn test_absent_user_gets_zero_row() {
    let rows = build_today_rows(&roster(), &[fact("Smith", 300, 0, 0, 0, 0)]);

    let brown = &rows[2];
    assert_eq!(brown.last_name, "Brown");
    assert_eq!(brown.time_accounted, 0);
    assert_eq!(brown.time_grade, Grade::Bad);
    assert_eq!(brown.all_ticket_count, 0);
    assert_eq!(brown.closed_ticket_count, 0);
    assert_eq!(brown.open_ticket_count, 0);
}

#[test]
fn test_closed_count_never_negative() {
    let rows = build_today_rows(&roster(), &[fact("Smith", 0, 0, 6, 2, 0)]);
    assert_eq!(rows[0].closed_ticket_count, 0);
}

#[test]
fn test_snapshot_replaced_as_a_whole() {
    let snapshot = TodaySnapshot::new();
    let empty = snapshot.get();
    assert!(empty.rows.is_empty());
    assert!(empty.captured_at.is_none());

    let first = build_today_rows(&roster(), &[]);
    snapshot.publish(first, local(2024, 5, 15, 10, 0));
    let held = snapshot.get();

    let second = build_today_rows(&roster(), &[fact("Smith", 480, 0, 0, 0, 0)]);
    snapshot.publish(second, local(2024, 5, 15, 10, 15));

    // readers keep the view they got
    assert_eq!(held.rows[0].time_accounted, 0);
    assert_eq!(held.captured_at, Some(local(2024, 5, 15, 10, 0)));

    let latest = snapshot.get();
    assert_eq!(latest.rows[0].time_accounted, 480);
    assert_eq!(latest.captured_at, Some(local(2024, 5, 15, 10, 15)));
}
