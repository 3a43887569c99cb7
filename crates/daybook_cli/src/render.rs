//! Text rendering of a month layout.
//!
//! Each week prints a date header, an optional per-day net total line, then one
//! line per layout row. Bars open with `[` where they start (or continue in
//! from an earlier week) and close with `]` where they end; the title is
//! printed once per week segment.

use chrono::{Datelike, NaiveDate};
use daybook_core::{KindTotals, MonthLayout, SlotBar, WeekRow};
use std::collections::BTreeMap;
use std::fmt::Write;

const CELL_WIDTH: usize = 12;
const SUNDAY_FIRST: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONDAY_FIRST: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub fn render_month(
    layout: &MonthLayout,
    totals: &BTreeMap<NaiveDate, KindTotals>,
    today: NaiveDate,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}-{:02}", layout.year, layout.month);

    let names = match layout.week_start {
        daybook_core::WeekStart::Sunday => SUNDAY_FIRST,
        daybook_core::WeekStart::Monday => MONDAY_FIRST,
    };
    out.push_str(&join_cells(names.iter().map(|name| pad(name))));

    for row in &layout.weeks {
        render_week(&mut out, row, totals, today);
    }
    out
}

fn render_week(
    out: &mut String,
    row: &WeekRow,
    totals: &BTreeMap<NaiveDate, KindTotals>,
    today: NaiveDate,
) {
    out.push_str(&"-".repeat(CELL_WIDTH * 7 + 6));
    out.push('\n');

    out.push_str(&join_cells(row.week.slots.iter().map(|slot| match slot {
        Some(date) if *date == today => pad(&format!("*{}", date.day())),
        Some(date) => pad(&date.day().to_string()),
        None => pad(""),
    })));

    let has_totals = row.week.dates().any(|(_, date)| totals.contains_key(&date));
    if has_totals {
        out.push_str(&join_cells(row.week.slots.iter().map(|slot| {
            let Some(day_totals) = slot.and_then(|date| totals.get(&date)) else {
                return pad("");
            };
            pad(&format!("{:+}", day_totals.net()))
        })));
    }

    let columns: Vec<_> = (0..7).map(|slot| row.layout.slot_rows(slot)).collect();
    for band in 0..row.layout.row_count() {
        out.push_str(&join_cells(columns.iter().map(|column| match &column[band] {
            Some(bar) => bar_cell(bar),
            None => pad(""),
        })));
    }
}

fn bar_cell(bar: &SlotBar<'_>) -> String {
    let left = if bar.flags.starts_here() { '[' } else { '=' };
    let right = if bar.flags.ends_here() { ']' } else { '=' };
    let inner_width = CELL_WIDTH - 2;

    let mut inner: String = if bar.flags.shows_title() {
        bar.event.title.chars().take(inner_width).collect()
    } else {
        String::new()
    };
    let fill = inner_width - inner.chars().count();
    inner.push_str(&"=".repeat(fill));
    format!("{left}{inner}{right}")
}

fn pad(text: &str) -> String {
    let clipped: String = text.chars().take(CELL_WIDTH).collect();
    format!("{clipped:<width$}", width = CELL_WIDTH)
}

fn join_cells(cells: impl Iterator<Item = String>) -> String {
    let mut line = cells.collect::<Vec<_>>().join("|");
    line.push('\n');
    line
}
