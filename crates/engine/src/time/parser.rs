//! Command-line date-time arguments.
//!
//! Accepted forms:
//!
//! ```text
//! mm<sep>dd[<sep>yyyy][:hh[:mm[:ss[.f]]]]     <sep> is one of / - , .
//! TODAY | YESTERDAY                           any letter case, no time part
//! ```
//!
//! Omitted time fields are zero, an omitted year is the current year, and
//! two-digit years pivot at 80 (`79` is 2079, `80` is 1980). Years before
//! 1980 are raised to 1980.

use chrono::{Datelike, Local, NaiveDate};

use super::DateTime;
use crate::CriteriaError;

const DATE_SEPARATORS: &[u8] = b"/-,.";
const EARLIEST_YEAR: u32 = 1980;

/// Parse against the local calendar date.
pub fn parse_date_time(input: &str) -> Result<DateTime, CriteriaError> {
    parse_date_time_today(input, Local::now().date_naive())
}

/// Parse with an explicit "today", which fixes the default year and the
/// meaning of the relative keywords.
pub fn parse_date_time_today(input: &str, today: NaiveDate) -> Result<DateTime, CriteriaError> {
    let err = |reason| CriteriaError::date(input, reason);
    let mut sc = Scanner::new(input);

    let today = (clamp_year(today.year()), today.month() as u8, today.day() as u8);

    let (year, month, day) = if sc.peek().is_some_and(|b| b.is_ascii_digit()) {
        let month = sc.number().ok_or_else(|| err("missing month"))?;
        sc.eat_any(DATE_SEPARATORS);
        let day = sc.number().ok_or_else(|| err("missing day"))?;
        let year = if sc.eat_any(DATE_SEPARATORS) {
            normalize_year(sc.number().ok_or_else(|| err("missing year"))?)
        } else {
            today.0
        };
        (year, month, day)
    } else {
        let word = sc.word();
        let (year, month, day) = match word.to_ascii_uppercase().as_str() {
            "TODAY" => today,
            "YESTERDAY" => day_before(today.0, today.1, today.2),
            "" => return Err(err("expected a date")),
            _ => return Err(err("expected TODAY or YESTERDAY")),
        };
        if !sc.at_end() {
            return Err(err("a time cannot follow TODAY or YESTERDAY"));
        }
        (year, u32::from(month), u32::from(day))
    };

    if !(1..=12).contains(&month) {
        return Err(err("month must be between 1 and 12"));
    }
    if !(1..=31).contains(&day) {
        return Err(err("day must be between 1 and 31"));
    }

    let mut clock = [0u32; 3];
    for (i, slot) in clock.iter_mut().enumerate() {
        if !sc.eat(b':') {
            break;
        }
        *slot = sc.number().ok_or_else(|| err(CLOCK_MISSING[i]))?;
    }
    // Fractions of a second are accepted and dropped.
    if sc.eat(b'.') {
        sc.number();
    }
    if !sc.at_end() {
        return Err(err("unexpected characters after the date"));
    }

    let [hour, minute, second] = clock;
    if hour > 23 {
        return Err(err("hour must be between 0 and 23"));
    }
    if minute > 59 {
        return Err(err("minute must be between 0 and 59"));
    }
    if second > 59 {
        return Err(err("second must be between 0 and 59"));
    }

    Ok(DateTime::new(
        year,
        month as u8,
        day as u8,
        hour as u8,
        minute as u8,
        second as u8,
    ))
}

const CLOCK_MISSING: [&str; 3] = ["missing hour", "missing minute", "missing second"];

fn clamp_year(year: i32) -> u16 {
    year.clamp(0, i32::from(u16::MAX)) as u16
}

fn normalize_year(raw: u32) -> u16 {
    let year = match raw {
        0..=79 => 2000 + raw,
        80..=99 => 1900 + raw,
        _ => raw,
    };
    year.clamp(EARLIEST_YEAR, u32::from(u16::MAX)) as u16
}

/// Leap years are every fourth year, with no century exception.
pub(crate) fn is_leap_year(year: u16) -> bool {
    year % 4 == 0
}

pub(crate) fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub(crate) fn day_before(year: u16, month: u8, day: u8) -> (u16, u8, u8) {
    if day > 1 {
        (year, month, day - 1)
    } else if month > 1 {
        (year, month - 1, days_in_month(year, month - 1))
    } else {
        (year.saturating_sub(1), 12, 31)
    }
}

/// Byte cursor over an ASCII argument.
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Scanner {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_any(&mut self, set: &[u8]) -> bool {
        match self.peek() {
            Some(b) if set.contains(&b) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// A run of decimal digits; `None` when there are none.
    fn number(&mut self) -> Option<u32> {
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
            value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
            self.pos += 1;
        }
        (self.pos > start).then_some(value)
    }

    fn word(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        // Only ASCII letters were consumed, so the slice is on char boundaries.
        std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
