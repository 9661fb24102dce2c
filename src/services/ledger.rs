//! Ledger service
//!
//! Records transactions and derives statistics from a user's record.

use std::collections::BTreeMap;

use chrono::Local;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Amount, Transaction, TransactionType, UserId};
use crate::storage::Storage;

/// Number of most recent transactions the income/expense sums cover
pub const STATS_WINDOW: usize = 10;

/// Aggregate figures for one user
///
/// `income_sum`, `expense_sum` and `balance` cover only the last
/// [`STATS_WINDOW`] transactions, while `category_totals` is all-time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    pub income_sum: Amount,
    pub expense_sum: Amount,
    pub balance: Amount,
    pub category_totals: BTreeMap<String, Amount>,
    /// How many transactions the sums were computed over
    pub window_len: usize,
}

impl Stats {
    /// True when there is nothing at all to report
    pub fn is_empty(&self) -> bool {
        self.window_len == 0 && self.category_totals.is_empty()
    }
}

/// Service for transaction recording and statistics
pub struct LedgerService<'a> {
    storage: &'a Storage,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Append a transaction to the user's log and persist it
    ///
    /// Expenses also add to the running total of their category.
    pub fn record_transaction(
        &self,
        user_id: &UserId,
        amount: Amount,
        category: &str,
        kind: TransactionType,
    ) -> FinanceResult<Transaction> {
        let category = category.trim();
        if category.is_empty() {
            return Err(FinanceError::Validation(
                "Transaction category cannot be empty".into(),
            ));
        }
        if amount.is_negative() {
            return Err(FinanceError::Validation(format!(
                "Transaction amount cannot be negative: {}",
                amount
            )));
        }

        let txn = Transaction::new(amount, category, kind, Local::now().naive_local());

        self.storage
            .users
            .update(user_id, |record| record.push_transaction(txn.clone()))?;

        info!(
            user = %user_id,
            kind = kind.as_str(),
            category = %txn.category,
            amount = amount.value(),
            "transaction recorded"
        );
        self.storage
            .log_create(EntityType::Transaction, user_id, &txn);

        Ok(txn)
    }

    /// Statistics for a user; an unknown user gets all-zero stats
    pub fn get_stats(&self, user_id: &UserId) -> FinanceResult<Stats> {
        let Some(record) = self.storage.users.get(user_id)? else {
            return Ok(Stats::default());
        };

        let window = record.recent_transactions(STATS_WINDOW);
        let income_sum: Amount = window
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let expense_sum: Amount = window
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        Ok(Stats {
            income_sum,
            expense_sum,
            balance: income_sum - expense_sum,
            category_totals: record.category_totals.clone(),
            window_len: window.len(),
        })
    }

    /// The last `n` transactions of a user, oldest first
    pub fn recent_transactions(&self, user_id: &UserId, n: usize) -> FinanceResult<Vec<Transaction>> {
        Ok(self
            .storage
            .users
            .get(user_id)?
            .map(|record| record.recent_transactions(n).to_vec())
            .unwrap_or_default())
    }
}
