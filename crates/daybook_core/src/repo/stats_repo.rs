//! Read-only aggregation queries backing the dashboard.
//!
//! All ranges are inclusive calendar-day ranges.

use super::{date_from_db, date_to_db, RepoError, RepoResult};
use crate::model::transaction::TransactionKind;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::Serialize;

/// Income and expense sums over some range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindTotals {
    pub income: i64,
    pub expense: i64,
}

impl KindTotals {
    /// Sums saturate at the `i64` bounds.
    pub fn add(&mut self, kind: TransactionKind, amount: i64) {
        match kind {
            TransactionKind::Income => self.income = self.income.saturating_add(amount),
            TransactionKind::Expense => self.expense = self.expense.saturating_add(amount),
        }
    }

    /// Income minus expense, saturating.
    pub fn net(&self) -> i64 {
        self.income.saturating_sub(self.expense)
    }
}

/// Sum of one kind on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: i64,
}

pub trait StatsRepository {
    fn totals_by_kind(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<KindTotals>;
    /// Per-day, per-kind sums ordered by date then kind.
    fn daily_totals(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<Vec<DailyTotal>>;
    /// Per-category sums of one kind, largest first, ties by category name.
    fn category_totals(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        kind: TransactionKind,
    ) -> RepoResult<Vec<CategoryTotal>>;
    /// Events whose start date lies in `start..=end`.
    fn count_events_starting(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<u32>;
}

pub struct SqliteStatsRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStatsRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StatsRepository for SqliteStatsRepository<'_> {
    fn totals_by_kind(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<KindTotals> {
        let mut stmt = self.conn.prepare(
            "SELECT type, SUM(amount) AS total
             FROM transactions
             WHERE date >= ?1 AND date <= ?2
             GROUP BY type;",
        )?;
        let mut rows = stmt.query(params![date_to_db(start), date_to_db(end)])?;
        let mut totals = KindTotals::default();
        while let Some(row) = rows.next()? {
            let type_text: String = row.get("type")?;
            totals.add(parse_kind(&type_text)?, row.get("total")?);
        }
        Ok(totals)
    }

    fn daily_totals(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<Vec<DailyTotal>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, type, SUM(amount) AS total
             FROM transactions
             WHERE date >= ?1 AND date <= ?2
             GROUP BY date, type
             ORDER BY date ASC, type ASC;",
        )?;
        let mut rows = stmt.query(params![date_to_db(start), date_to_db(end)])?;
        let mut totals = Vec::new();
        while let Some(row) = rows.next()? {
            let date_text: String = row.get("date")?;
            let type_text: String = row.get("type")?;
            totals.push(DailyTotal {
                date: date_from_db(&date_text, "transactions.date")?,
                kind: parse_kind(&type_text)?,
                total: row.get("total")?,
            });
        }
        Ok(totals)
    }

    fn category_totals(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        kind: TransactionKind,
    ) -> RepoResult<Vec<CategoryTotal>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, SUM(amount) AS total
             FROM transactions
             WHERE date >= ?1 AND date <= ?2 AND type = ?3
             GROUP BY category
             ORDER BY total DESC, category ASC;",
        )?;
        let mut rows = stmt.query(params![date_to_db(start), date_to_db(end), kind.as_str()])?;
        let mut totals = Vec::new();
        while let Some(row) = rows.next()? {
            totals.push(CategoryTotal {
                category: row.get("category")?,
                total: row.get("total")?,
            });
        }
        Ok(totals)
    }

    fn count_events_starting(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<u32> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM events WHERE start_date >= ?1 AND start_date <= ?2;",
            params![date_to_db(start), date_to_db(end)],
            |row| row.get::<_, u32>(0),
        )?;
        Ok(count)
    }
}

fn parse_kind(value: &str) -> RepoResult<TransactionKind> {
    TransactionKind::parse(value).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid transaction type `{value}` in transactions.type"
        ))
    })
}
