//! Weekly roll-up: a roster x 7-day matrix graded for display.

use crate::core::calendar::{classify_week, week_day_list};
use crate::errors::AppResult;
use crate::ledger::Ledger;
use crate::models::grade::{Grade, HeaderKind};
use crate::models::roster::RosterEntry;
use crate::models::week::{WeekCell, WeekMatrix, WeekRow, Workday};

/// Build the matrix for the local week shifted by `week_offset` weeks.
pub fn week_view(ledger: &dyn Ledger, roster: &[RosterEntry], week_offset: i64) -> AppResult<WeekMatrix> {
    let days = week_day_list(week_offset);
    let overrides = ledger.get_override_by_day_sequence(days[0], days.len() as i64)?;
    let week = classify_week(&days, &overrides);
    build_week(ledger, roster, &week)
}

/// Roll up stored minutes for `roster` over an already classified week.
pub fn build_week(ledger: &dyn Ledger, roster: &[RosterEntry], week: &[Workday; 7]) -> AppResult<WeekMatrix> {
    let mut header = [HeaderKind::Total; 8];
    let mut workday_count = 0;
    for (i, day) in week.iter().enumerate() {
        if day.is_workday {
            header[i + 1] = HeaderKind::Workday;
            workday_count += 1;
        } else {
            header[i + 1] = HeaderKind::DayOff;
        }
    }

    let mut rows = Vec::with_capacity(roster.len());
    for user in roster {
        let mut cells: [WeekCell; 8] = Default::default();

        for (i, day) in week.iter().enumerate() {
            let stored = ledger.get_accounted_time_by_day_and_lastname(day.day, &user.last_name)?;

            let cell = &mut cells[i + 1];
            cell.time += stored.work_minutes;
            cell.overtime += stored.overtime_minutes;
            cell.grade = Grade::for_day(cell.total(), day.is_workday);
            cell.overtime_visible = cell.overtime > 0;

            cells[0].time += stored.total();
        }

        cells[0].grade = Grade::for_minutes(cells[0].time, workday_count);

        rows.push(WeekRow {
            user: user.clone(),
            cells,
        });
    }

    Ok(WeekMatrix {
        days: *week,
        header,
        workday_count,
        rows,
    })
}
