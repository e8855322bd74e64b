mod parser;

use std::{fmt, time::SystemTime};

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

pub use parser::{parse_date_time, parse_date_time_today};

/// A wall-clock timestamp at second resolution.
///
/// Field order is significant: the derived ordering compares year, then
/// month, then day, hour, minute and second. Day and month are range
/// checked when parsed but never against the length of the month, so
/// `2/31` is a legal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    /// Sorts before every timestamp a filesystem can report.
    pub const MIN: DateTime = DateTime {
        year: 0,
        month: 0,
        day: 0,
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Sorts after every timestamp a filesystem can report.
    pub const MAX: DateTime = DateTime {
        year: u16::MAX,
        month: u8::MAX,
        day: u8::MAX,
        hour: u8::MAX,
        minute: u8::MAX,
        second: u8::MAX,
    };

    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        DateTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Midnight on the given day.
    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        DateTime::new(year, month, day, 0, 0, 0)
    }

    /// Local wall-clock time of a filesystem timestamp.
    pub fn from_system_time(t: SystemTime) -> Self {
        let local: chrono::DateTime<Local> = t.into();
        DateTime::from(local.naive_local())
    }

    /// `M/DD/YYYY`, the listing's date column.
    pub fn date_column(&self) -> String {
        format!("{}/{:02}/{:04}", self.month, self.day, self.year)
    }

    /// `H:MM:SS`, the listing's time column.
    pub fn time_column(&self) -> String {
        format!("{}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl From<NaiveDateTime> for DateTime {
    fn from(dt: NaiveDateTime) -> Self {
        DateTime {
            year: dt.year().clamp(0, i32::from(u16::MAX)) as u16,
            month: dt.month() as u8,
            day: dt.day() as u8,
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
            second: dt.second() as u8,
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
