//! Dashboard aggregations.
//!
//! # Invariants
//! - Month-over-month change is `0` when the previous month total is `0`.
//! - `today` is always an explicit argument so results are reproducible.

use super::ServiceResult;
use crate::calendar::{month_bounds, previous_month, DateError};
use crate::model::event::CalendarEvent;
use crate::model::transaction::{Transaction, TransactionKind};
use crate::repo::event_repo::EventRepository;
use crate::repo::stats_repo::{CategoryTotal, StatsRepository};
use crate::repo::transaction_repo::TransactionRepository;
use crate::repo::RepoResult;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

pub const RECENT_DEFAULT_LIMIT: u32 = 5;
pub const RECENT_LIMIT_MAX: u32 = 50;
const CATEGORY_WINDOW_DAYS: i64 = 7;

/// Summary cards of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub total_income: i64,
    pub total_expense: i64,
    /// Percent change against the previous month.
    pub income_change: f64,
    pub expense_change: f64,
    /// Events starting in the month.
    pub event_count: u32,
    /// Events starting on `today`.
    pub today_event_count: u32,
}

/// One bar pair of the daily chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyChartPoint {
    pub day: u32,
    pub income: i64,
    pub expense: i64,
}

pub struct DashboardService<S, T, E>
where
    S: StatsRepository,
    T: TransactionRepository,
    E: EventRepository,
{
    stats: S,
    transactions: T,
    events: E,
    recent_limit: u32,
}

impl<S, T, E> DashboardService<S, T, E>
where
    S: StatsRepository,
    T: TransactionRepository,
    E: EventRepository,
{
    pub fn new(stats: S, transactions: T, events: E) -> Self {
        Self {
            stats,
            transactions,
            events,
            recent_limit: RECENT_DEFAULT_LIMIT,
        }
    }

    /// Overrides the limit used when callers pass none.
    pub fn with_recent_limit(mut self, limit: u32) -> Self {
        self.recent_limit = normalize_recent_limit(Some(limit));
        self
    }

    pub fn monthly_stats(
        &self,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> ServiceResult<MonthlyStats> {
        let (first, last) = month_bounds(year, month)?;
        let (prev_year, prev_month) = previous_month(year, month);
        let (prev_first, prev_last) = month_bounds(prev_year, prev_month)?;

        let current = self.stats.totals_by_kind(first, last)?;
        let previous = self.stats.totals_by_kind(prev_first, prev_last)?;

        Ok(MonthlyStats {
            total_income: current.income,
            total_expense: current.expense,
            income_change: percent_change(current.income, previous.income),
            expense_change: percent_change(current.expense, previous.expense),
            event_count: self.stats.count_events_starting(first, last)?,
            today_event_count: self.stats.count_events_starting(today, today)?,
        })
    }

    /// One point per day that has at least one transaction, sorted by day.
    pub fn daily_chart(&self, year: i32, month: u32) -> ServiceResult<Vec<DailyChartPoint>> {
        let (first, last) = month_bounds(year, month)?;
        let mut points: BTreeMap<u32, DailyChartPoint> = BTreeMap::new();
        for total in self.stats.daily_totals(first, last)? {
            let day = total.date.day();
            let point = points.entry(day).or_insert(DailyChartPoint {
                day,
                income: 0,
                expense: 0,
            });
            match total.kind {
                TransactionKind::Income => point.income = total.total,
                TransactionKind::Expense => point.expense = total.total,
            }
        }
        Ok(points.into_values().collect())
    }

    /// Newest transactions; `None` uses the configured default limit.
    pub fn recent_transactions(&self, limit: Option<u32>) -> RepoResult<Vec<Transaction>> {
        let limit = normalize_recent_limit(limit.or(Some(self.recent_limit)));
        self.transactions.recent_transactions(limit)
    }

    /// Events covering `today`.
    pub fn today_events(&self, today: NaiveDate) -> RepoResult<Vec<CalendarEvent>> {
        self.events.list_events_overlapping(today, today)
    }

    /// Expense totals per category over the 7 days ending on `today`.
    pub fn weekly_category_stats(&self, today: NaiveDate) -> ServiceResult<Vec<CategoryTotal>> {
        let start = today
            .checked_sub_signed(Duration::days(CATEGORY_WINDOW_DAYS - 1))
            .ok_or(DateError::OutOfRange(today))?;
        Ok(self
            .stats
            .category_totals(start, today, TransactionKind::Expense)?)
    }
}

/// Clamps a caller limit into `1..=RECENT_LIMIT_MAX`.
pub fn normalize_recent_limit(limit: Option<u32>) -> u32 {
    limit
        .unwrap_or(RECENT_DEFAULT_LIMIT)
        .clamp(1, RECENT_LIMIT_MAX)
}

fn percent_change(current: i64, previous: i64) -> f64 {
    if previous > 0 {
        (current as f64 - previous as f64) / previous as f64 * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_recent_limit, percent_change};

    #[test]
    fn percent_change_is_zero_without_baseline() {
        assert_eq!(percent_change(1_000, 0), 0.0);
        assert_eq!(percent_change(150, 100), 50.0);
        assert_eq!(percent_change(50, 100), -50.0);
    }

    #[test]
    fn recent_limit_defaults_and_clamps() {
        assert_eq!(normalize_recent_limit(None), 5);
        assert_eq!(normalize_recent_limit(Some(0)), 1);
        assert_eq!(normalize_recent_limit(Some(500)), 50);
    }
}
