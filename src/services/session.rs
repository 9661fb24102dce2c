//! Interaction state machine
//!
//! Tracks, per user, what the next free-text message means. States live in
//! memory only and are gone after a restart.
//!
//! ```text
//! Idle --select category--> AwaitingAmount{category, kind}
//! Idle --add reminder-----> AwaitingReminderText
//! AwaitingAmount --valid number--> Idle      (transaction recorded)
//! AwaitingAmount --anything else--> AwaitingAmount (re-prompt)
//! AwaitingReminderText --text--> Idle        (reminder added)
//! Idle --text--> Idle                        (ignored)
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Amount, AmountParseError, TransactionType, UserId};

/// What the next free-text message from a user is expected to be
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingAmount {
        category: String,
        kind: TransactionType,
    },
    AwaitingReminderText,
}

/// How a free-text message should be handled, given the sender's state
#[derive(Debug, Clone, PartialEq)]
pub enum FreeText {
    /// A pending transaction got a valid amount
    Amount {
        category: String,
        kind: TransactionType,
        amount: Amount,
    },
    /// A pending transaction got something that is not an amount
    InvalidAmount {
        category: String,
        kind: TransactionType,
        error: AmountParseError,
    },
    /// The body of a pending reminder
    ReminderText(String),
    /// Nothing was pending
    Ignored,
}

/// Per-user session states
#[derive(Debug, Default)]
pub struct SessionManager {
    states: Mutex<HashMap<UserId, SessionState>>,
}

impl SessionManager {
    /// Create a manager with every user idle
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a user
    pub fn state(&self, user_id: &UserId) -> FinanceResult<SessionState> {
        let states = self.lock()?;
        Ok(states.get(user_id).cloned().unwrap_or_default())
    }

    /// Wait for an amount for a transaction of `kind` in `category`
    pub fn await_amount(
        &self,
        user_id: &UserId,
        category: impl Into<String>,
        kind: TransactionType,
    ) -> FinanceResult<()> {
        let category = category.into();
        debug!(user = %user_id, %category, kind = kind.as_str(), "awaiting amount");
        self.set(user_id, SessionState::AwaitingAmount { category, kind })
    }

    /// Wait for the text of a new reminder
    pub fn await_reminder_text(&self, user_id: &UserId) -> FinanceResult<()> {
        debug!(user = %user_id, "awaiting reminder text");
        self.set(user_id, SessionState::AwaitingReminderText)
    }

    /// Return a user to idle
    pub fn clear(&self, user_id: &UserId) -> FinanceResult<()> {
        let mut states = self.lock()?;
        if states.remove(user_id).is_some() {
            debug!(user = %user_id, "session cleared");
        }
        Ok(())
    }

    /// Return a user to idle if they are still in `expected`
    ///
    /// A state set by some other action after `expected` was read is kept.
    /// Returns whether the state was cleared.
    pub fn finish(&self, user_id: &UserId, expected: &SessionState) -> FinanceResult<bool> {
        let mut states = self.lock()?;
        if states.get(user_id) != Some(expected) {
            debug!(user = %user_id, "session changed meanwhile, keeping it");
            return Ok(false);
        }
        states.remove(user_id);
        debug!(user = %user_id, "session finished");
        Ok(true)
    }

    /// Interpret a free-text message without changing any state
    ///
    /// The caller finishes the state once it has acted on the result, so a
    /// failure while acting leaves the user where they were.
    pub fn classify(&self, user_id: &UserId, text: &str) -> FinanceResult<FreeText> {
        let classified = match self.state(user_id)? {
            SessionState::Idle => FreeText::Ignored,
            SessionState::AwaitingAmount { category, kind } => match Amount::parse(text) {
                Ok(amount) => FreeText::Amount {
                    category,
                    kind,
                    amount,
                },
                Err(error) => FreeText::InvalidAmount {
                    category,
                    kind,
                    error,
                },
            },
            SessionState::AwaitingReminderText => FreeText::ReminderText(text.to_string()),
        };
        Ok(classified)
    }

    /// Number of users with something pending
    pub fn pending_count(&self) -> FinanceResult<usize> {
        Ok(self.lock()?.len())
    }

    fn set(&self, user_id: &UserId, state: SessionState) -> FinanceResult<()> {
        let mut states = self.lock()?;
        if state == SessionState::Idle {
            states.remove(user_id);
        } else {
            states.insert(user_id.clone(), state);
        }
        Ok(())
    }

    fn lock(&self) -> FinanceResult<std::sync::MutexGuard<'_, HashMap<UserId, SessionState>>> {
        self.states
            .lock()
            .map_err(|e| FinanceError::Session(format!("Failed to acquire session lock: {}", e)))
    }
}
