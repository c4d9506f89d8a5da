/// ANSI color helper utilities for terminal output.
use crate::models::grade::{Grade, HeaderKind};
use crate::models::roster::WorkShift;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const WHITE: &str = "\x1b[37m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// good → green, average → yellow, bad → red
pub fn color_for_grade(grade: Grade) -> &'static str {
    match grade {
        Grade::Good => GREEN,
        Grade::Average => YELLOW,
        Grade::Bad => RED,
    }
}

pub fn color_for_header(kind: HeaderKind) -> &'static str {
    match kind {
        HeaderKind::Total => WHITE,
        HeaderKind::Workday => CYAN,
        HeaderKind::DayOff => MAGENTA,
    }
}

pub fn color_for_shift(shift: WorkShift) -> &'static str {
    match shift {
        WorkShift::Morning => BLUE,
        WorkShift::Evening => MAGENTA,
    }
}

/// GREY for zero values, RESET otherwise.
pub fn color_for_count(value: i64) -> &'static str {
    if value == 0 { GREY } else { RESET }
}
