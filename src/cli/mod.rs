//! CLI command handlers
//!
//! Bridges clap argument parsing and the chat loop with the bot facade.

pub mod audit;
pub mod chat;
pub mod reminder;
pub mod transaction;

pub use audit::handle_audit_command;
pub use chat::{parse_input, ChatInput, ChatSession};
pub use reminder::{handle_reminder_command, ReminderCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
