//! Ledger transaction model.
//!
//! # Invariants
//! - `amount` is a positive integer in minor currency units; the sign lives in `kind`.
//! - `category` is never blank.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned transaction identifier.
pub type TransactionId = i64;

/// Direction of money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Storage/wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Parses the storage representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub amount: i64,
    /// Serialized as `type` to match the storage column.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub description: Option<String>,
}

/// Writable fields of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(i64),
    EmptyCategory,
}

impl Display for TransactionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "transaction amount must be positive, got {amount}")
            }
            Self::EmptyCategory => write!(f, "transaction category cannot be empty"),
        }
    }
}

impl Error for TransactionValidationError {}

impl TransactionDraft {
    pub fn new(
        date: NaiveDate,
        amount: i64,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            amount,
            kind,
            category: category.into(),
            description: None,
        }
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_fields(self.amount, &self.category)
    }

    pub fn into_transaction(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            date: self.date,
            amount: self.amount,
            kind: self.kind,
            category: self.category,
            description: self.description,
        }
    }
}

impl Transaction {
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_fields(self.amount, &self.category)
    }
}

fn validate_fields(amount: i64, category: &str) -> Result<(), TransactionValidationError> {
    if amount <= 0 {
        return Err(TransactionValidationError::NonPositiveAmount(amount));
    }
    if category.trim().is_empty() {
        return Err(TransactionValidationError::EmptyCategory);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{TransactionDraft, TransactionKind, TransactionValidationError};
    use chrono::NaiveDate;

    #[test]
    fn kind_parses_storage_values_only() {
        assert_eq!(TransactionKind::parse("income"), Some(TransactionKind::Income));
        assert_eq!(TransactionKind::parse("expense"), Some(TransactionKind::Expense));
        assert_eq!(TransactionKind::parse("Expense"), None);
    }

    #[test]
    fn validate_rejects_zero_amount_and_blank_category() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        let zero = TransactionDraft::new(date, 0, TransactionKind::Expense, "food");
        assert_eq!(
            zero.validate(),
            Err(TransactionValidationError::NonPositiveAmount(0))
        );

        let blank = TransactionDraft::new(date, 100, TransactionKind::Income, " ");
        assert_eq!(blank.validate(), Err(TransactionValidationError::EmptyCategory));
    }
}
