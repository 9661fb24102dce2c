//! Bot facade
//!
//! The surface the chat transport talks to. Each inbound user action is one
//! method returning a [`Reply`]; the session state machine decides what free
//! text means and the ledger and reminder services do the work.
//!
//! # Example
//!
//! ```rust,ignore
//! let bot = FinanceBot::new(Storage::open(paths)?, settings);
//! let user = UserId::from(42_i64);
//!
//! bot.select_category(&user, TransactionType::Expense, "транспорт")?;
//! let reply = bot.submit_free_text(&user, "150")?;
//! ```

pub mod reply;

pub use reply::Reply;

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{TransactionType, UserId};
use crate::services::{FreeText, LedgerService, ReminderService, SessionManager, SessionState};
use crate::storage::Storage;

/// The finance assistant: storage, settings and live sessions
pub struct FinanceBot {
    storage: Storage,
    settings: Settings,
    sessions: SessionManager,
}

impl FinanceBot {
    /// Create a bot over already opened storage
    pub fn new(storage: Storage, settings: Settings) -> Self {
        Self {
            storage,
            settings,
            sessions: SessionManager::new(),
        }
    }

    /// The settings in use
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The underlying storage
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Current session state of a user
    pub fn session_state(&self, user_id: &UserId) -> FinanceResult<SessionState> {
        self.sessions.state(user_id)
    }

    /// Drop all sessions and close the storage, saving anything unsaved
    pub fn shutdown(self) -> FinanceResult<()> {
        let pending = self.sessions.pending_count()?;
        if pending > 0 {
            info!(pending, "discarding unfinished sessions");
        }
        self.storage.close()
    }

    fn ledger(&self) -> LedgerService<'_> {
        LedgerService::new(&self.storage)
    }

    fn reminders(&self) -> ReminderService<'_> {
        ReminderService::new(&self.storage)
    }

    /// Back to the main menu, abandoning whatever was pending
    pub fn cancel(&self, user_id: &UserId) -> FinanceResult<Reply> {
        self.sessions.clear(user_id)?;
        Ok(Reply::MainMenu)
    }

    /// The user picked "income" or "expense"
    pub fn select_transaction_type(
        &self,
        user_id: &UserId,
        kind: TransactionType,
    ) -> FinanceResult<Reply> {
        self.sessions.clear(user_id)?;
        Ok(Reply::ChooseCategory {
            kind,
            categories: self.settings.categories_for(kind).to_vec(),
        })
    }

    /// The user picked a category; the next free text is the amount
    pub fn select_category(
        &self,
        user_id: &UserId,
        kind: TransactionType,
        category: &str,
    ) -> FinanceResult<Reply> {
        let category = category.trim();
        if category.is_empty() {
            return Err(FinanceError::Validation("Category cannot be empty".into()));
        }

        self.sessions.await_amount(user_id, category, kind)?;
        Ok(Reply::PromptAmount {
            kind,
            category: category.to_string(),
        })
    }

    /// The user picked "add reminder"; the next free text is its body
    pub fn request_add_reminder(&self, user_id: &UserId) -> FinanceResult<Reply> {
        self.sessions.await_reminder_text(user_id)?;
        Ok(Reply::PromptReminderText)
    }

    /// A free-text message, routed by the user's session state
    ///
    /// A storage or validation failure is returned as an error and the
    /// session is left as it was, so the text can be sent again.
    pub fn submit_free_text(&self, user_id: &UserId, text: &str) -> FinanceResult<Reply> {
        match self.sessions.classify(user_id, text)? {
            FreeText::Amount {
                category,
                kind,
                amount,
            } => {
                let txn = self
                    .ledger()
                    .record_transaction(user_id, amount, &category, kind)?;
                self.finish_session(user_id, &SessionState::AwaitingAmount { category, kind });
                Ok(Reply::TransactionRecorded(txn))
            }
            FreeText::InvalidAmount {
                category,
                kind,
                error,
            } => {
                debug!(user = %user_id, %error, "amount not understood, asking again");
                Ok(Reply::InvalidAmount { kind, category })
            }
            FreeText::ReminderText(body) => {
                let added = self.reminders().add_reminder(user_id, &body)?;
                self.finish_session(user_id, &SessionState::AwaitingReminderText);
                Ok(match added {
                    Some(reminder) => Reply::ReminderAdded(reminder),
                    None => Reply::ReminderNotAdded,
                })
            }
            FreeText::Ignored => Ok(Reply::Ignored),
        }
    }

    /// Leave the session that was just acted on
    ///
    /// The work is already saved at this point, so a failure here is only
    /// logged.
    fn finish_session(&self, user_id: &UserId, acted_on: &SessionState) {
        if let Err(e) = self.sessions.finish(user_id, acted_on) {
            warn!(user = %user_id, error = %e, "could not finish session");
        }
    }

    /// Add a reminder in one step, outside of any session
    pub fn add_reminder_direct(&self, user_id: &UserId, text: &str) -> FinanceResult<Reply> {
        Ok(match self.reminders().add_reminder(user_id, text)? {
            Some(reminder) => Reply::ReminderAdded(reminder),
            None => Reply::ReminderNotAdded,
        })
    }

    /// Statistics for the user
    pub fn request_stats(&self, user_id: &UserId) -> FinanceResult<Reply> {
        Ok(Reply::Stats(self.ledger().get_stats(user_id)?))
    }

    /// The user's reminders
    pub fn request_reminders(&self, user_id: &UserId) -> FinanceResult<Reply> {
        Ok(Reply::Reminders(self.reminders().list_reminders(user_id)?))
    }

    /// Static money-management tips
    pub fn request_tips(&self, _user_id: &UserId) -> FinanceResult<Reply> {
        Ok(Reply::Tips(self.settings.tips.clone()))
    }
}
