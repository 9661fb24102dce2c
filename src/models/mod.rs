//! Core data models for the finance tracker
//!
//! Users, their transactions and reminders, and the amount type.

pub mod amount;
pub mod ids;
pub mod reminder;
pub mod transaction;
pub mod user_record;

pub use amount::{Amount, AmountParseError};
pub use ids::UserId;
pub use reminder::{Reminder, REMINDER_DATE_FORMAT};
pub use transaction::{Transaction, TransactionType, TRANSACTION_DATE_FORMAT};
pub use user_record::UserRecord;
