//! Text helpers for terminal reports.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// Minutes as `HH:MM`. With `signed`, non-zero values get a `+`/`-` prefix.
pub fn hhmm(mins: i64, signed: bool) -> String {
    let abs = mins.abs();
    let sign = match (signed, mins.signum()) {
        (true, 1) => "+",
        (true, -1) => "-",
        _ => "",
    };
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

/// Week cell text: `HH:MM`, then `+HH:MM` when overtime is shown.
pub fn cell_minutes(time: i64, overtime: i64, show_overtime: bool) -> String {
    if show_overtime {
        format!("{} {}", hhmm(time, false), hhmm(overtime, true))
    } else {
        hhmm(time, false)
    }
}
