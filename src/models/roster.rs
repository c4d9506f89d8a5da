use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkShift {
    Morning,
    Evening,
}

impl WorkShift {
    pub fn css_class(&self) -> &'static str {
        match self {
            WorkShift::Morning => "morning-shift-grid-col",
            WorkShift::Evening => "evening-shift-grid-col",
        }
    }
}

/// A user shown in the reports, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub last_name: String,
    pub work_shift: WorkShift,
    /// Draw a group separator after this user.
    #[serde(default)]
    pub last_in_group: bool,
}

impl RosterEntry {
    pub fn new(last_name: &str, work_shift: WorkShift, last_in_group: bool) -> Self {
        Self {
            last_name: last_name.to_string(),
            work_shift,
            last_in_group,
        }
    }
}
