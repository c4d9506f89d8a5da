//! "Today" rows and the snapshot they are published through.

use crate::models::facts::TodayFact;
use crate::models::grade::Grade;
use crate::models::roster::RosterEntry;
use crate::models::today::{Snapshot, TodayRow};
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Assemble one row per roster user, in roster order.
///
/// Users missing from `facts` get an all-zero row.
pub fn build_today_rows(roster: &[RosterEntry], facts: &[TodayFact]) -> Vec<TodayRow> {
    let by_name: HashMap<&str, &TodayFact> =
        facts.iter().map(|f| (f.last_name.as_str(), f)).collect();

    roster
        .iter()
        .map(|user| {
            let fact = by_name.get(user.last_name.as_str()).copied();
            assemble_row(user, fact)
        })
        .collect()
}

fn assemble_row(user: &RosterEntry, fact: Option<&TodayFact>) -> TodayRow {
    let zero = TodayFact::default();
    let fact = fact.unwrap_or(&zero);

    let time = fact.work_minutes + fact.overtime_minutes;

    TodayRow {
        last_name: user.last_name.clone(),
        work_shift: user.work_shift,
        time_accounted: time,
        time_grade: Grade::for_minutes(time, 1),
        all_ticket_count: fact.locked_ticket_count,
        closed_ticket_count: (fact.locked_ticket_count - fact.not_closed_ticket_count).max(0),
        open_ticket_count: fact.open_ticket_count,
        last_in_group: user.last_in_group,
    }
}

/// Latest "today" view, replaced as a whole on every publish.
///
/// Readers get an `Arc` to an immutable [`Snapshot`]; the guard is only held
/// for the pointer swap.
#[derive(Debug, Default)]
pub struct TodaySnapshot {
    current: Mutex<Arc<Snapshot>>,
}

impl TodaySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, rows: Vec<TodayRow>, captured_at: DateTime<Local>) {
        let next = Arc::new(Snapshot {
            rows,
            captured_at: Some(captured_at),
        });
        let mut guard = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *guard = next;
    }

    pub fn get(&self) -> Arc<Snapshot> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
