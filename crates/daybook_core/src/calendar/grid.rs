//! Month grid: weeks of 7 optional day slots.

use super::{month_bounds, DateError};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: usize = 7;

/// Weekday shown in the first grid column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }
}

/// One grid row: 7 slots, `None` for padding outside the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    pub slots: [Option<NaiveDate>; DAYS_PER_WEEK],
}

impl Week {
    pub fn new(slots: [Option<NaiveDate>; DAYS_PER_WEEK]) -> Self {
        Self { slots }
    }

    /// A week of 7 consecutive days starting at `first`; days past the end
    /// of the calendar stay empty.
    pub fn starting(first: NaiveDate) -> Self {
        let mut slots = [None; DAYS_PER_WEEK];
        for (offset, slot) in slots.iter_mut().enumerate() {
            *slot = first.checked_add_signed(Duration::days(offset as i64));
        }
        Self { slots }
    }

    /// Concrete dates with their slot index, in slot order.
    pub fn dates(&self) -> impl Iterator<Item = (usize, NaiveDate)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|date| (index, date)))
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.slots.iter().flatten().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.slots.iter().rev().flatten().next().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Splits `year`-`month` into grid weeks.
///
/// Days before the 1st in the first week and after the last day in the final
/// week are `None`, matching a grid that shows only the current month.
pub fn month_weeks(year: i32, month: u32, week_start: WeekStart) -> Result<Vec<Week>, DateError> {
    let (first, last) = month_bounds(year, month)?;
    let leading = days_from_week_start(first.weekday(), week_start);

    let mut weeks = Vec::new();
    let mut current = [None; DAYS_PER_WEEK];
    let mut filled = leading;
    let mut day = first;

    while day <= last {
        current[filled] = Some(day);
        filled += 1;
        if filled == DAYS_PER_WEEK {
            weeks.push(Week::new(current));
            current = [None; DAYS_PER_WEEK];
            filled = 0;
        }
        day += Duration::days(1);
    }
    if filled > 0 {
        weeks.push(Week::new(current));
    }

    Ok(weeks)
}

fn days_from_week_start(weekday: Weekday, week_start: WeekStart) -> usize {
    let day = weekday.num_days_from_monday() as usize;
    let start = week_start.weekday().num_days_from_monday() as usize;
    (day + DAYS_PER_WEEK - start) % DAYS_PER_WEEK
}
