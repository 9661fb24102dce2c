//! Transaction model
//!
//! A transaction is an income or an expense of some amount in a category.
//! Transactions are immutable once recorded.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::amount::Amount;

/// Display precision of a transaction timestamp (day.month hour:minute)
pub const TRANSACTION_DATE_FORMAT: &str = "%d.%m %H:%M";

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// The lowercase wire name (`income` / `expense`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: Amount,

    pub category: String,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Creation time, formatted with [`TRANSACTION_DATE_FORMAT`]
    #[serde(rename = "date")]
    pub created_at: String,
}

impl Transaction {
    /// Create a new transaction stamped with `now`
    pub fn new(
        amount: Amount,
        category: impl Into<String>,
        kind: TransactionType,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            amount,
            category: category.into(),
            kind,
            created_at: now.format(TRANSACTION_DATE_FORMAT).to_string(),
        }
    }

    /// Check if this is an income
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}
