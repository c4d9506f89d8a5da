use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::{format_day, weekday_label};
use crate::core::week::week_view;
use crate::errors::{AppError, AppResult};
use crate::ledger::SqliteLedger;
use crate::models::week::{WeekCell, WeekMatrix};
use crate::utils::colors::{color_for_grade, color_for_header, color_for_shift};
use crate::utils::formatting::{bold, cell_minutes};
use crate::utils::hhmm;
use crate::utils::table::{Cell, Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Week { offset, json } = cmd {
        let ledger = SqliteLedger::open(&cfg.database)?;
        let matrix = week_view(&ledger, &cfg.roster, *offset)?;

        if *json {
            let out =
                serde_json::to_string_pretty(&matrix).map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            print_week(&matrix);
        }
    }

    Ok(())
}

fn print_week(matrix: &WeekMatrix) {
    println!(
        "{} {} - {} ({} workdays)\n",
        bold("📅 Week"),
        format_day(matrix.days[0].day),
        format_day(matrix.days[6].day),
        matrix.workday_count
    );

    let mut columns = vec![
        Column::new("User", 16),
        Column::colored("Total", 8, color_for_header(matrix.header[0])),
    ];
    for (i, kind) in matrix.header.iter().skip(1).enumerate() {
        columns.push(Column::colored(weekday_label(i), 13, color_for_header(*kind)));
    }

    let mut table = Table::new(columns);
    for row in &matrix.rows {
        let mut cells = vec![
            Cell::colored(&row.user.last_name, color_for_shift(row.user.work_shift)),
            Cell::colored(
                hhmm(row.cells[0].time, false),
                color_for_grade(row.cells[0].grade),
            ),
        ];
        cells.extend(row.cells.iter().skip(1).map(day_cell));
        table.add_row(cells);

        if row.user.last_in_group {
            table.add_separator();
        }
    }

    print!("{}", table.render());
}

fn day_cell(cell: &WeekCell) -> Cell {
    Cell::colored(
        cell_minutes(cell.time, cell.overtime, cell.overtime_visible),
        color_for_grade(cell.grade),
    )
}
