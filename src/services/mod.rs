//! Service layer for the finance tracker
//!
//! Business logic on top of the storage layer: recording transactions and
//! reminders, deriving statistics, and tracking where each user is in a
//! conversation.

pub mod ledger;
pub mod reminder;
pub mod session;

pub use ledger::{LedgerService, Stats, STATS_WINDOW};
pub use reminder::ReminderService;
pub use session::{FreeText, SessionManager, SessionState};
