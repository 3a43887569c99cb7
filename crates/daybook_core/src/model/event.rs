//! Calendar event model.
//!
//! # Responsibility
//! - Define the stored event record and its writable draft.
//! - Validate title, date range and display color.
//!
//! # Invariants
//! - `end_date` is never earlier than `start_date`.
//! - `title` is never blank.
//! - `color`, when present, is a `#rrggbb` hex string.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color regex"));

/// Store-assigned event identifier.
pub type EventId = i64;

/// Color used by callers when an event carries none.
pub const DEFAULT_EVENT_COLOR: &str = "#3b82f6";

/// Stored calendar event.
///
/// Dates are inclusive and have calendar-day granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// Writable fields of an event, used for create and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Validation errors for event writes and read-backs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    EmptyTitle,
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    InvalidColor(String),
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "event title cannot be empty"),
            Self::EndBeforeStart { start, end } => {
                write!(f, "event end date {end} is earlier than start date {start}")
            }
            Self::InvalidColor(value) => {
                write!(f, "invalid event color `{value}`; expected #rrggbb")
            }
        }
    }
}

impl Error for EventValidationError {}

impl EventDraft {
    /// Creates a single-day draft without description or color.
    pub fn single_day(title: impl Into<String>, date: NaiveDate) -> Self {
        Self::spanning(title, date, date)
    }

    /// Creates a draft covering `start..=end`.
    pub fn spanning(title: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            title: title.into(),
            start_date: start,
            end_date: end,
            description: None,
            color: None,
        }
    }

    /// Checks the write-side invariants of an event.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        validate_fields(
            &self.title,
            self.start_date,
            self.end_date,
            self.color.as_deref(),
        )
    }

    /// Binds this draft to a store-assigned id.
    pub fn into_event(self, id: EventId) -> CalendarEvent {
        CalendarEvent {
            id,
            title: self.title,
            start_date: self.start_date,
            end_date: self.end_date,
            description: self.description,
            color: self.color,
        }
    }
}

impl CalendarEvent {
    /// Checks the same invariants as [`EventDraft::validate`].
    pub fn validate(&self) -> Result<(), EventValidationError> {
        validate_fields(
            &self.title,
            self.start_date,
            self.end_date,
            self.color.as_deref(),
        )
    }

    /// Returns whether `day` lies inside this event's inclusive range.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// Length of the event in whole calendar days, minus one.
    ///
    /// A single-day event has span 0. Used only for relative ordering.
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Returns whether `value` is a `#rrggbb` color string.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}

fn validate_fields(
    title: &str,
    start: NaiveDate,
    end: NaiveDate,
    color: Option<&str>,
) -> Result<(), EventValidationError> {
    if title.trim().is_empty() {
        return Err(EventValidationError::EmptyTitle);
    }
    if end < start {
        return Err(EventValidationError::EndBeforeStart { start, end });
    }
    if let Some(color) = color {
        if !is_hex_color(color) {
            return Err(EventValidationError::InvalidColor(color.to_string()));
        }
    }
    Ok(())
}
