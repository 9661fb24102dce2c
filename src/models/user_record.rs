//! Per-user record
//!
//! Holds everything stored for one user: the transaction log, the running
//! expense totals per category, and the reminder list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};

use super::amount::Amount;
use super::reminder::Reminder;
use super::transaction::Transaction;

/// Everything persisted for a single user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Transactions in insertion order
    #[serde(default)]
    pub transactions: Vec<Transaction>,

    /// Cumulative expense amount per category. Income never contributes.
    #[serde(default, rename = "categories")]
    pub category_totals: BTreeMap<String, Amount>,

    /// Reminders in insertion order
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

impl UserRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction, keeping `category_totals` in step
    ///
    /// Fails without changing the record if the amount, or the category
    /// total it would produce, is not a finite number.
    pub fn push_transaction(&mut self, txn: Transaction) -> FinanceResult<()> {
        if !txn.amount.is_finite() {
            return Err(FinanceError::Validation(format!(
                "Transaction amount is not a finite number: {}",
                txn.amount
            )));
        }

        if txn.is_expense() {
            let current = self
                .category_totals
                .get(&txn.category)
                .copied()
                .unwrap_or_default();
            let total = current.checked_add(txn.amount).ok_or_else(|| {
                FinanceError::Validation(format!(
                    "Total for '{}' would exceed the largest amount that can be stored",
                    txn.category
                ))
            })?;
            self.category_totals.insert(txn.category.clone(), total);
        }

        self.transactions.push(txn);
        Ok(())
    }

    /// Append a reminder
    pub fn push_reminder(&mut self, reminder: Reminder) {
        self.reminders.push(reminder);
    }

    /// The last `n` transactions, oldest first
    pub fn recent_transactions(&self, n: usize) -> &[Transaction] {
        let start = self.transactions.len().saturating_sub(n);
        &self.transactions[start..]
    }

    /// Recompute the expense total of `category` by scanning the log
    pub fn scanned_category_total(&self, category: &str) -> Amount {
        self.transactions
            .iter()
            .filter(|t| t.is_expense() && t.category == category)
            .map(|t| t.amount)
            .sum()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use chrono::NaiveDate;

    fn txn(amount: f64, category: &str, kind: TransactionType) -> Transaction {
        let now = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        Transaction::new(Amount::new(amount), category, kind, now)
    }

    #[test]
    fn test_expenses_update_totals() {
        let mut record = UserRecord::new();
        record.push_transaction(txn(150.0, "transport", TransactionType::Expense)).unwrap();
        record.push_transaction(txn(50.0, "transport", TransactionType::Expense)).unwrap();
        record.push_transaction(txn(20.0, "food", TransactionType::Expense)).unwrap();

        assert_eq!(record.category_totals["transport"].value(), 200.0);
        assert_eq!(record.category_totals["food"].value(), 20.0);
    }

    #[test]
    fn test_income_never_touches_totals() {
        let mut record = UserRecord::new();
        record.push_transaction(txn(1000.0, "salary", TransactionType::Income)).unwrap();
        record.push_transaction(txn(30.0, "other", TransactionType::Income)).unwrap();

        assert!(record.category_totals.is_empty());
        assert_eq!(record.transactions.len(), 2);
    }

    #[test]
    fn test_incremental_totals_match_scan() {
        let mut record = UserRecord::new();
        let categories = ["food", "transport", "fun"];
        for i in 0..40 {
            let kind = if i % 3 == 0 {
                TransactionType::Income
            } else {
                TransactionType::Expense
            };
            record.push_transaction(txn(i as f64 * 1.5, categories[i % 3], kind)).unwrap();
        }

        for category in categories {
            let incremental = record
                .category_totals
                .get(category)
                .copied()
                .unwrap_or_default();
            assert_eq!(incremental, record.scanned_category_total(category));
        }
    }

    #[test]
    fn test_recent_transactions() {
        let mut record = UserRecord::new();
        assert!(record.recent_transactions(10).is_empty());

        for i in 1..=15 {
            record.push_transaction(txn(i as f64, "food", TransactionType::Expense)).unwrap();
        }

        let recent = record.recent_transactions(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].amount.value(), 6.0);
        assert_eq!(recent[9].amount.value(), 15.0);
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let mut record = UserRecord::new();
        record
            .push_transaction(txn(1e308, "food", TransactionType::Expense))
            .unwrap();

        let err = record
            .push_transaction(txn(1e308, "food", TransactionType::Expense))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(record.transactions.len(), 1);
        assert_eq!(record.category_totals["food"].value(), 1e308);

        // Other categories still have room
        record
            .push_transaction(txn(1e308, "fun", TransactionType::Expense))
            .unwrap();
    }

    #[test]
    fn test_non_finite_amount_is_rejected() {
        let mut record = UserRecord::new();
        let err = record
            .push_transaction(txn(f64::INFINITY, "salary", TransactionType::Income))
            .unwrap_err();
        assert!(err.is_validation());
        assert!(record.transactions.is_empty());
    }

    #[test]
    fn test_persisted_field_names() {
        let mut record = UserRecord::new();
        record.push_transaction(txn(5.0, "food", TransactionType::Expense)).unwrap();
        let value = serde_json::to_value(&record).unwrap();

        assert!(value.get("transactions").is_some());
        assert_eq!(value["categories"]["food"], 5.0);
        assert!(value["reminders"].as_array().unwrap().is_empty());
    }
}
