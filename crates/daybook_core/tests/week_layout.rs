use chrono::{Duration, NaiveDate};
use daybook_core::{compute_week_layout, CalendarEvent, EventDraft, Week};
use std::collections::HashSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn event(id: i64, start: NaiveDate, end: NaiveDate) -> CalendarEvent {
    EventDraft::spanning(format!("event {id}"), start, end).into_event(id)
}

/// [null, null, 2024-05-01 .. 2024-05-05]
fn padded_may_week() -> Week {
    let mut slots = [None; 7];
    for (offset, slot) in slots.iter_mut().skip(2).enumerate() {
        *slot = Some(date(2024, 5, 1) + Duration::days(offset as i64));
    }
    Week::new(slots)
}

#[test]
fn single_event_gets_row_zero_with_true_boundaries() {
    let week = padded_may_week();
    let e1 = event(1, date(2024, 5, 1), date(2024, 5, 3));

    let layout = compute_week_layout(&week, &[e1]);

    assert_eq!(layout.visible_events.len(), 1);
    assert_eq!(layout.row(1), Some(0));
    let first = layout.flags(1, 2).unwrap();
    assert!(first.is_start && !first.is_end);
    let last = layout.flags(1, 4).unwrap();
    assert!(last.is_end && !last.is_start);
    assert!(layout.flags(1, 5).is_none());
    assert!(layout.flags(1, 0).is_none());
}

#[test]
fn overlapping_shorter_event_moves_to_next_row() {
    let week = padded_may_week();
    let e1 = event(1, date(2024, 5, 1), date(2024, 5, 3));
    let e2 = event(2, date(2024, 5, 2), date(2024, 5, 4));

    let layout = compute_week_layout(&week, &[e2, e1]);

    assert_eq!(layout.row(1), Some(0));
    assert_eq!(layout.row(2), Some(1));
    assert_eq!(layout.row_count(), 2);
}

#[test]
fn equal_duration_overlap_goes_to_earlier_start_first() {
    let week = padded_may_week();
    let late = event(1, date(2024, 5, 2), date(2024, 5, 3));
    let early = event(2, date(2024, 5, 1), date(2024, 5, 2));

    let layout = compute_week_layout(&week, &[late, early]);

    assert_eq!(layout.row(2), Some(0));
    assert_eq!(layout.row(1), Some(1));
}

#[test]
fn event_from_previous_week_is_clipped_at_first_concrete_slot() {
    let mut slots = [None; 7];
    for (offset, slot) in slots.iter_mut().skip(1).enumerate() {
        *slot = Some(date(2024, 4, 29) + Duration::days(offset as i64));
    }
    let week = Week::new(slots);
    let e3 = event(3, date(2024, 4, 28), date(2024, 5, 2));

    let layout = compute_week_layout(&week, &[e3]);

    assert_eq!(layout.row(3), Some(0));
    assert!(layout.flags(3, 0).is_none());
    let edge = layout.flags(3, 1).unwrap();
    assert!(edge.is_week_start);
    assert!(!edge.is_start);
    assert!(edge.shows_title());
    let inner = layout.flags(3, 2).unwrap();
    assert!(!inner.shows_title());
    let end = layout.flags(3, 4).unwrap();
    assert!(end.is_end && end.ends_here());
}

#[test]
fn identical_events_keep_input_order() {
    let week = padded_may_week();
    let events = [
        event(10, date(2024, 5, 1), date(2024, 5, 1)),
        event(20, date(2024, 5, 1), date(2024, 5, 1)),
        event(30, date(2024, 5, 1), date(2024, 5, 1)),
    ];

    let layout = compute_week_layout(&week, &events);

    assert_eq!(layout.row(10), Some(0));
    assert_eq!(layout.row(20), Some(1));
    assert_eq!(layout.row(30), Some(2));
    let column = layout.slot_rows(2);
    let ids: Vec<i64> = column.iter().flatten().map(|bar| bar.event.id).collect();
    assert_eq!(ids, vec![10, 20, 30]);
}

#[test]
fn event_outside_week_is_not_visible() {
    let week = padded_may_week();
    let before = event(1, date(2024, 4, 20), date(2024, 4, 30));
    let after = event(2, date(2024, 5, 6), date(2024, 5, 9));

    let layout = compute_week_layout(&week, &[before, after]);

    assert!(layout.is_empty());
    assert!(layout.row_of.is_empty());
    assert!(layout.render_flags.is_empty());
}

#[test]
fn event_spanning_whole_week_occupies_every_slot_on_one_row() {
    let week = Week::starting(date(2024, 5, 5));
    let long = event(1, date(2024, 4, 20), date(2024, 5, 20));
    let exact = event(2, date(2024, 5, 5), date(2024, 5, 11));

    let layout = compute_week_layout(&week, &[exact, long]);

    assert_eq!(layout.row(1), Some(0));
    assert_eq!(layout.row(2), Some(1));
    for slot in 0..7 {
        let flags = layout.flags(1, slot).unwrap();
        assert!(!flags.is_start && !flags.is_end);
        assert_eq!(flags.is_week_start, slot == 0);
        assert_eq!(flags.is_week_end, slot == 6);
        assert_eq!(flags.starts_here(), slot == 0);
        assert_eq!(flags.ends_here(), slot == 6);

        let exact_flags = layout.flags(2, slot).unwrap();
        assert_eq!(exact_flags.is_start, slot == 0);
        assert_eq!(exact_flags.is_end, slot == 6);
    }
}

#[test]
fn padding_slots_never_block_rows() {
    let mut slots = [None; 7];
    slots[0] = Some(date(2024, 5, 26));
    slots[1] = Some(date(2024, 5, 27));
    let week = Week::new(slots);
    let a = event(1, date(2024, 5, 26), date(2024, 6, 3));
    let b = event(2, date(2024, 5, 28), date(2024, 6, 1));

    let layout = compute_week_layout(&week, &[a, b]);

    assert_eq!(layout.visible_events.len(), 1);
    assert_eq!(layout.row(1), Some(0));
    assert!(layout.flags(1, 1).unwrap().is_week_end);
}

/// Small deterministic generator for the sweep.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) % bound
    }
}

#[test]
fn rows_never_share_a_day_and_layout_is_deterministic() {
    let base = date(2024, 4, 21);
    let mut rng = Lcg(42);

    for round in 0..200 {
        let week_first = base + Duration::days(rng.next(14) as i64);
        let mut week = Week::starting(week_first);
        let leading = rng.next(4) as usize;
        let trailing = rng.next(4) as usize;
        for slot in week.slots.iter_mut().take(leading) {
            *slot = None;
        }
        for slot in week.slots.iter_mut().rev().take(trailing) {
            *slot = None;
        }

        let events: Vec<CalendarEvent> = (0..rng.next(12) as i64)
            .map(|id| {
                let start = base + Duration::days(rng.next(28) as i64);
                let end = start + Duration::days(rng.next(9) as i64);
                event(round * 100 + id, start, end)
            })
            .collect();

        let layout = compute_week_layout(&week, &events);
        assert_eq!(layout, compute_week_layout(&week, &events));

        let week_dates: Vec<NaiveDate> = week.dates().map(|(_, d)| d).collect();
        for candidate in &events {
            let visible = week_dates.iter().any(|d| candidate.covers(*d));
            assert_eq!(layout.row(candidate.id).is_some(), visible);
        }

        let mut claimed: Vec<HashSet<NaiveDate>> = vec![HashSet::new(); layout.row_count()];
        for placed in &layout.visible_events {
            let row = layout.row(placed.id).unwrap();
            for day in week_dates.iter().filter(|d| placed.covers(**d)) {
                assert!(claimed[row].insert(*day), "row {row} double-booked on {day}");
            }
        }
        assert!(layout.row_count() <= layout.visible_events.len());

        for slot in 0..7 {
            let column = layout.slot_rows(slot);
            assert_eq!(column.len(), layout.row_count());
            if week.slots[slot].is_none() {
                assert!(column.iter().all(Option::is_none));
            }
        }
    }
}
