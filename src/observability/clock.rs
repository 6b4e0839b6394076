//! Time source for log timestamps.

use chrono::{DateTime, Local};

/// Timestamp layout of the `date` field.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Format an instant as `YYYY-MM-DD HH:mm:ss`.
pub fn format_timestamp(instant: &DateTime<Local>) -> String {
    instant.format(DATE_FORMAT).to_string()
}
