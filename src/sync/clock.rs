use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use std::time::Duration;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant.
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Time left until the next multiple of `interval` counted from local
/// midnight (:00/:15/:30/:45 for a 15 minute interval). Exactly on a
/// boundary, the following one is returned.
pub fn until_next_boundary(now: NaiveDateTime, interval: Duration) -> Duration {
    let step = interval.as_secs().max(1);
    let into_step = u64::from(now.num_seconds_from_midnight()) % step;
    Duration::from_secs(step - into_step)
}

/// Time left until `grace` after the next local midnight.
pub fn until_after_midnight(now: NaiveDateTime, grace: Duration) -> Duration {
    let elapsed_today = u64::from(now.num_seconds_from_midnight());
    Duration::from_secs(24 * 60 * 60 - elapsed_today) + grace
}
