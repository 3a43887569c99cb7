//! Ledger transaction use-cases.

use super::{ServiceError, ServiceResult};
use crate::calendar::month_bounds;
use crate::model::transaction::{Transaction, TransactionDraft, TransactionId};
use crate::repo::stats_repo::KindTotals;
use crate::repo::transaction_repo::TransactionRepository;
use crate::repo::RepoResult;
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeMap;

pub struct LedgerService<R: TransactionRepository> {
    repo: R,
}

impl<R: TransactionRepository> LedgerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_transaction(&self, draft: TransactionDraft) -> ServiceResult<Transaction> {
        let id = self.repo.create_transaction(&draft)?;
        info!(
            "event=transaction_create module=service status=ok id={id} type={}",
            draft.kind
        );
        self.read_back(id, "created transaction not found in read-back")
    }

    pub fn update_transaction(
        &self,
        id: TransactionId,
        draft: TransactionDraft,
    ) -> ServiceResult<Transaction> {
        self.repo.update_transaction(id, &draft)?;
        info!("event=transaction_update module=service status=ok id={id}");
        self.read_back(id, "updated transaction not found in read-back")
    }

    pub fn get_transaction(&self, id: TransactionId) -> RepoResult<Option<Transaction>> {
        self.repo.get_transaction(id)
    }

    pub fn delete_transaction(&self, id: TransactionId) -> RepoResult<()> {
        self.repo.delete_transaction(id)?;
        info!("event=transaction_delete module=service status=ok id={id}");
        Ok(())
    }

    pub fn list_transactions(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<Transaction>> {
        self.repo.list_transactions(start, end)
    }

    pub fn transactions_for_month(&self, year: i32, month: u32) -> ServiceResult<Vec<Transaction>> {
        let (first, last) = month_bounds(year, month)?;
        Ok(self.repo.list_transactions(first, last)?)
    }

    /// Income/expense sums per day of the month; days without entries are absent.
    pub fn day_totals_for_month(
        &self,
        year: i32,
        month: u32,
    ) -> ServiceResult<BTreeMap<NaiveDate, KindTotals>> {
        let mut totals: BTreeMap<NaiveDate, KindTotals> = BTreeMap::new();
        for transaction in self.transactions_for_month(year, month)? {
            totals
                .entry(transaction.date)
                .or_default()
                .add(transaction.kind, transaction.amount);
        }
        Ok(totals)
    }

    fn read_back(&self, id: TransactionId, details: &'static str) -> ServiceResult<Transaction> {
        self.repo
            .get_transaction(id)?
            .ok_or(ServiceError::InconsistentState(details))
    }
}
