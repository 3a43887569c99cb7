//! Weekly event band layout.
//!
//! Events visible in a week are placed longest-first into the lowest row
//! whose occupancy does not intersect the event's in-week days. Ties on
//! duration go to the earlier start; full ties keep input order.
//!
//! # Preconditions
//! - Event ids are unique within `events`.
//! - `end_date >= start_date`. An inverted event covers no day and is
//!   therefore never visible; the write path rejects such events earlier.

use crate::calendar::Week;
use crate::model::event::{CalendarEvent, EventId};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};

/// Boundary facts for one event on one slot of a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFlags {
    /// Slot date is the event's first day.
    pub is_start: bool,
    /// Slot date is the event's last day.
    pub is_end: bool,
    /// Slot is the first concrete slot of the week.
    pub is_week_start: bool,
    /// Slot is the last concrete slot of the week.
    pub is_week_end: bool,
}

impl RenderFlags {
    /// Bar is drawn with a leading edge here: the true start, or the week's
    /// left edge for an event that began earlier.
    pub fn starts_here(self) -> bool {
        self.is_start || self.is_week_start
    }

    pub fn ends_here(self) -> bool {
        self.is_end || self.is_week_end
    }

    /// The title label is drawn once per week segment, at its leading edge.
    pub fn shows_title(self) -> bool {
        self.starts_here()
    }
}

/// Layout of one grid week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekLayout {
    /// Events intersecting the week, in placement order.
    pub visible_events: Vec<CalendarEvent>,
    /// Row index per visible event.
    pub row_of: BTreeMap<EventId, usize>,
    /// Flags per `(event, slot index)` for every slot the event covers.
    pub render_flags: BTreeMap<(EventId, usize), RenderFlags>,
    row_count: usize,
}

/// One occupied cell of a slot column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBar<'a> {
    pub event: &'a CalendarEvent,
    pub row: usize,
    pub flags: RenderFlags,
}

impl WeekLayout {
    fn empty() -> Self {
        Self {
            visible_events: Vec::new(),
            row_count: 0,
            row_of: BTreeMap::new(),
            render_flags: BTreeMap::new(),
        }
    }

    /// Number of rows used by this week (0 when nothing is visible).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.visible_events.is_empty()
    }

    pub fn row(&self, id: EventId) -> Option<usize> {
        self.row_of.get(&id).copied()
    }

    pub fn flags(&self, id: EventId, slot: usize) -> Option<RenderFlags> {
        self.render_flags.get(&(id, slot)).copied()
    }

    /// Column for `slot`: one entry per row, `None` where the row is free.
    ///
    /// Every column of a week has the same length so free rows can render
    /// as same-height placeholders and bars stay aligned across the week.
    pub fn slot_rows(&self, slot: usize) -> Vec<Option<SlotBar<'_>>> {
        let mut column = vec![None; self.row_count];
        for event in &self.visible_events {
            let (Some(row), Some(flags)) = (self.row(event.id), self.flags(event.id, slot)) else {
                continue;
            };
            column[row] = Some(SlotBar { event, row, flags });
        }
        column
    }
}

/// Computes row assignment and clipping flags for one week.
///
/// `events` may be any superset of the week's events; anything that covers
/// no concrete slot is dropped. Empty input yields an empty layout.
pub fn compute_week_layout(week: &Week, events: &[CalendarEvent]) -> WeekLayout {
    let week_dates: Vec<(usize, NaiveDate)> = week.dates().collect();
    if week_dates.is_empty() {
        return WeekLayout::empty();
    }

    let mut visible: Vec<&CalendarEvent> = events
        .iter()
        .filter(|event| week_dates.iter().any(|(_, date)| event.covers(*date)))
        .collect();
    visible.sort_by(|a, b| {
        b.span_days()
            .cmp(&a.span_days())
            .then_with(|| a.start_date.cmp(&b.start_date))
    });

    let mut occupancy: Vec<HashSet<NaiveDate>> = Vec::new();
    let mut row_of = BTreeMap::new();
    for event in &visible {
        let in_week: Vec<NaiveDate> = week_dates
            .iter()
            .map(|(_, date)| *date)
            .filter(|date| event.covers(*date))
            .collect();

        let mut row = 0;
        while occupancy
            .get(row)
            .is_some_and(|claimed| in_week.iter().any(|date| claimed.contains(date)))
        {
            row += 1;
        }
        if row == occupancy.len() {
            occupancy.push(HashSet::new());
        }
        occupancy[row].extend(in_week);
        row_of.insert(event.id, row);
    }

    let first_slot = week_dates.first().map(|(slot, _)| *slot);
    let last_slot = week_dates.last().map(|(slot, _)| *slot);
    let mut render_flags = BTreeMap::new();
    for event in &visible {
        for (slot, date) in &week_dates {
            if !event.covers(*date) {
                continue;
            }
            render_flags.insert(
                (event.id, *slot),
                RenderFlags {
                    is_start: *date == event.start_date,
                    is_end: *date == event.end_date,
                    is_week_start: Some(*slot) == first_slot,
                    is_week_end: Some(*slot) == last_slot,
                },
            );
        }
    }

    WeekLayout {
        visible_events: visible.into_iter().cloned().collect(),
        row_count: occupancy.len(),
        row_of,
        render_flags,
    }
}

#[cfg(test)]
mod tests {
    use super::compute_week_layout;
    use crate::calendar::Week;
    use crate::model::event::{CalendarEvent, EventDraft};
    use chrono::NaiveDate;

    fn may(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).expect("valid date")
    }

    fn event(id: i64, start: NaiveDate, end: NaiveDate) -> CalendarEvent {
        EventDraft::spanning(format!("event {id}"), start, end).into_event(id)
    }

    #[test]
    fn empty_week_yields_empty_layout() {
        let week = Week::new([None; 7]);
        let layout = compute_week_layout(&week, &[event(1, may(1), may(2))]);
        assert!(layout.is_empty());
        assert_eq!(layout.row_count(), 0);
        assert!(layout.slot_rows(0).is_empty());
    }

    #[test]
    fn slot_rows_pad_free_rows_with_placeholders() {
        let week = Week::starting(may(5));
        let long = event(1, may(5), may(8));
        let short = event(2, may(6), may(6));
        let late = event(3, may(10), may(11));
        let layout = compute_week_layout(&week, &[short, long, late]);

        assert_eq!(layout.row_count(), 2);
        let sunday = layout.slot_rows(0);
        assert_eq!(sunday.len(), 2);
        assert_eq!(sunday[0].map(|bar| bar.event.id), Some(1));
        assert!(sunday[1].is_none());

        let friday = layout.slot_rows(5);
        assert_eq!(friday[0].map(|bar| bar.event.id), Some(3));
        assert!(friday[1].is_none());
    }

    #[test]
    fn inverted_event_is_never_visible() {
        let week = Week::starting(may(5));
        let layout = compute_week_layout(&week, &[event(1, may(8), may(6))]);
        assert!(layout.is_empty());
    }
}
