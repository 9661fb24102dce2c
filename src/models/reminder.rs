//! Reminder model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display precision of a reminder timestamp
pub const REMINDER_DATE_FORMAT: &str = "%Y.%m.%d";

/// A free-text note the user wants to keep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub text: String,

    /// Creation day, formatted with [`REMINDER_DATE_FORMAT`]
    #[serde(rename = "date")]
    pub created_at: String,
}

impl Reminder {
    /// Create a reminder stamped with `today`
    pub fn new(text: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            text: text.into(),
            created_at: today.format(REMINDER_DATE_FORMAT).to_string(),
        }
    }

    /// Whether `text` is acceptable as a reminder body
    pub fn is_valid_text(text: &str) -> bool {
        !text.trim().is_empty()
    }
}
