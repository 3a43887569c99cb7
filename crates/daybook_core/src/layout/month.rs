//! Month-level wrapper running the week layout over every grid row.

use super::week::{compute_week_layout, WeekLayout};
use crate::calendar::{month_weeks, DateError, Week, WeekStart};
use crate::model::event::CalendarEvent;

/// One grid row with its computed layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    pub week: Week,
    pub layout: WeekLayout,
}

/// Layout of a whole month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub week_start: WeekStart,
    pub weeks: Vec<WeekRow>,
}

impl MonthLayout {
    /// Builds the grid for `year`-`month` and lays out each week on its own.
    ///
    /// Row indices are per week: an event crossing a week boundary may sit
    /// on different rows in consecutive weeks.
    pub fn compute(
        year: i32,
        month: u32,
        week_start: WeekStart,
        events: &[CalendarEvent],
    ) -> Result<Self, DateError> {
        let weeks = month_weeks(year, month, week_start)?
            .into_iter()
            .map(|week| WeekRow {
                layout: compute_week_layout(&week, events),
                week,
            })
            .collect();

        Ok(Self {
            year,
            month,
            week_start,
            weeks,
        })
    }

    /// Distinct events shown anywhere in the month.
    pub fn visible_event_count(&self) -> usize {
        let mut ids: Vec<_> = self
            .weeks
            .iter()
            .flat_map(|row| row.layout.visible_events.iter().map(|event| event.id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}
