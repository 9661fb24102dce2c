//! Outbound results of bot actions
//!
//! Plain data only; turning a reply into text is the display layer's job.

use crate::models::{Reminder, Transaction, TransactionType};
use crate::services::Stats;

/// What the core hands back to the presentation layer for one action
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Show the main menu
    MainMenu,
    /// Let the user pick a category for a transaction of `kind`
    ChooseCategory {
        kind: TransactionType,
        categories: Vec<String>,
    },
    /// Ask for the amount of a pending transaction
    PromptAmount {
        kind: TransactionType,
        category: String,
    },
    /// The text sent for a pending transaction was not a valid amount
    InvalidAmount {
        kind: TransactionType,
        category: String,
    },
    /// A transaction was recorded and saved
    TransactionRecorded(Transaction),
    /// Ask for the text of a new reminder
    PromptReminderText,
    /// A reminder was added and saved
    ReminderAdded(Reminder),
    /// The reminder text was blank, nothing was added
    ReminderNotAdded,
    /// Statistics for the user
    Stats(Stats),
    /// The user's reminders, oldest first
    Reminders(Vec<Reminder>),
    /// Static advice
    Tips(Vec<String>),
    /// Free text with nothing pending; no response is needed
    Ignored,
}
