//! Repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity.
//! - Keep SQL inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate drafts before any SQL mutation.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Missing ids surface as `NotFound`, separate from transport errors.

use crate::calendar::{format_date, parse_date};
use crate::db::DbError;
use crate::model::event::EventValidationError;
use crate::model::transaction::TransactionValidationError;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod event_repo;
pub mod stats_repo;
pub mod transaction_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity addressed by a `NotFound` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Event,
    Transaction,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Event => f.write_str("event"),
            Self::Transaction => f.write_str("transaction"),
        }
    }
}

#[derive(Debug)]
pub enum RepoError {
    EventValidation(EventValidationError),
    TransactionValidation(TransactionValidationError),
    Db(DbError),
    NotFound { kind: EntityKind, id: i64 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventValidation(err) => write!(f, "{err}"),
            Self::TransactionValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EventValidation(err) => Some(err),
            Self::TransactionValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<EventValidationError> for RepoError {
    fn from(value: EventValidationError) -> Self {
        Self::EventValidation(value)
    }
}

impl From<TransactionValidationError> for RepoError {
    fn from(value: TransactionValidationError) -> Self {
        Self::TransactionValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn date_to_db(date: NaiveDate) -> String {
    format_date(date)
}

pub(crate) fn date_from_db(value: &str, column: &str) -> RepoResult<NaiveDate> {
    parse_date(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{value}` in {column}")))
}
