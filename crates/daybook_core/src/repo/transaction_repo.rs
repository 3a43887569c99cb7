//! Transaction repository contract and SQLite implementation.
//!
//! # Invariants
//! - Range listings are ordered by `date ASC, id ASC`.
//! - Recent listings are ordered by `date DESC, id DESC`.

use super::{date_from_db, date_to_db, EntityKind, RepoError, RepoResult};
use crate::model::transaction::{Transaction, TransactionDraft, TransactionId, TransactionKind};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

const TRANSACTION_SELECT_SQL: &str = "SELECT
    id,
    date,
    amount,
    type,
    category,
    description
FROM transactions";

pub trait TransactionRepository {
    fn create_transaction(&self, draft: &TransactionDraft) -> RepoResult<TransactionId>;
    fn update_transaction(&self, id: TransactionId, draft: &TransactionDraft) -> RepoResult<()>;
    fn get_transaction(&self, id: TransactionId) -> RepoResult<Option<Transaction>>;
    /// Transactions dated within `start..=end`.
    fn list_transactions(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<Vec<Transaction>>;
    /// Newest transactions first, at most `limit` rows.
    fn recent_transactions(&self, limit: u32) -> RepoResult<Vec<Transaction>>;
    fn delete_transaction(&self, id: TransactionId) -> RepoResult<()>;
}

pub struct SqliteTransactionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTransactionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn collect_rows(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut transactions = Vec::new();
        while let Some(row) = rows.next()? {
            transactions.push(parse_transaction_row(row)?);
        }
        Ok(transactions)
    }
}

impl TransactionRepository for SqliteTransactionRepository<'_> {
    fn create_transaction(&self, draft: &TransactionDraft) -> RepoResult<TransactionId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO transactions (date, amount, type, category, description)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                date_to_db(draft.date),
                draft.amount,
                draft.kind.as_str(),
                draft.category.as_str(),
                draft.description.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_transaction(&self, id: TransactionId, draft: &TransactionDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE transactions
             SET
                date = ?1,
                amount = ?2,
                type = ?3,
                category = ?4,
                description = ?5
             WHERE id = ?6;",
            params![
                date_to_db(draft.date),
                draft.amount,
                draft.kind.as_str(),
                draft.category.as_str(),
                draft.description.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Transaction,
                id,
            });
        }
        Ok(())
    }

    fn get_transaction(&self, id: TransactionId) -> RepoResult<Option<Transaction>> {
        let mut found = self.collect_rows(
            &format!("{TRANSACTION_SELECT_SQL} WHERE id = ?1;"),
            [id],
        )?;
        Ok(found.pop())
    }

    fn list_transactions(&self, start: NaiveDate, end: NaiveDate) -> RepoResult<Vec<Transaction>> {
        self.collect_rows(
            &format!(
                "{TRANSACTION_SELECT_SQL}
                 WHERE date >= ?1 AND date <= ?2
                 ORDER BY date ASC, id ASC;"
            ),
            params![date_to_db(start), date_to_db(end)],
        )
    }

    fn recent_transactions(&self, limit: u32) -> RepoResult<Vec<Transaction>> {
        self.collect_rows(
            &format!("{TRANSACTION_SELECT_SQL} ORDER BY date DESC, id DESC LIMIT ?1;"),
            [i64::from(limit)],
        )
    }

    fn delete_transaction(&self, id: TransactionId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Transaction,
                id,
            });
        }
        Ok(())
    }
}

fn parse_transaction_row(row: &Row<'_>) -> RepoResult<Transaction> {
    let date_text: String = row.get("date")?;
    let type_text: String = row.get("type")?;
    let kind = TransactionKind::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid transaction type `{type_text}` in transactions.type"
        ))
    })?;

    let transaction = Transaction {
        id: row.get("id")?,
        date: date_from_db(&date_text, "transactions.date")?,
        amount: row.get("amount")?,
        kind,
        category: row.get("category")?,
        description: row.get("description")?,
    };
    transaction.validate()?;
    Ok(transaction)
}
