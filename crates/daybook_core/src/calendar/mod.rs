//! Calendar-day helpers and month grid construction.
//!
//! # Responsibility
//! - Parse and format zero-padded ISO dates (`YYYY-MM-DD`).
//! - Compute month bounds with real month ends.
//! - Split a month into 7-slot weeks with empty padding slots.
//!
//! # Invariants
//! - Every [`Week`] has exactly 7 slots.
//! - Concrete slots inside one week are consecutive calendar days.

mod grid;

pub use grid::{month_weeks, Week, WeekStart, DAYS_PER_WEEK};

use chrono::{Datelike, Duration, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Input is not a `YYYY-MM-DD` date (optionally followed by `T...`).
    InvalidDate(String),
    /// Year/month pair does not name a real month.
    InvalidMonth { year: i32, month: u32 },
    /// Date arithmetic left the representable calendar range.
    OutOfRange(NaiveDate),
}

impl Display for DateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => write!(f, "invalid date `{value}`; expected YYYY-MM-DD"),
            Self::InvalidMonth { year, month } => {
                write!(f, "invalid month {year}-{month}; month must be 1..=12")
            }
            Self::OutOfRange(date) => write!(f, "date range around {date} is out of range"),
        }
    }
}

impl Error for DateError {}

/// Parses a calendar day.
///
/// A date-time string such as `2024-05-01T09:30:00` is accepted and only its
/// date part is used.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateError> {
    let trimmed = value.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, ISO_DATE_FORMAT)
        .map_err(|_| DateError::InvalidDate(value.to_string()))
}

/// Formats a calendar day as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// First and last day of `year`-`month` (month is 1-based).
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), DateError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(DateError::InvalidMonth { year, month })?;
    let (next_year, next_month) = next_month(year, month);
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or(DateError::InvalidMonth { year, month })?;
    Ok((first, next_first - Duration::days(1)))
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, DateError> {
    let (_, last) = month_bounds(year, month)?;
    Ok(last.day())
}

/// Month before `year`-`month`, wrapping across January.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}
