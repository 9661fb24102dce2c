//! Finance tracker - conversational personal finance ledger
//!
//! Users record incomes and expenses by category, look at recent statistics,
//! read static tips, and keep free-text reminders. A chat transport drives
//! the [`bot::FinanceBot`] facade; everything below it is plain data.
//!
//! # Architecture
//!
//! - `config`: Data directory and settings
//! - `error`: Custom error types
//! - `models`: Users, transactions, reminders, amounts
//! - `storage`: Single JSON document with atomic writes
//! - `audit`: Append-only log of created entries
//! - `services`: Ledger, reminders, and the per-user session state machine
//! - `bot`: Inbound actions and their replies
//! - `display`: Text rendering of replies
//! - `cli`: Chat loop and one-shot commands
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::config::{FinancePaths, Settings};
//! use finance_tracker::storage::Storage;
//! use finance_tracker::bot::FinanceBot;
//!
//! let paths = FinancePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let bot = FinanceBot::new(Storage::open(paths)?, settings);
//! ```

pub mod audit;
pub mod bot;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::FinanceError;
