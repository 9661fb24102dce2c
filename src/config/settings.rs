//! User settings for the finance tracker
//!
//! Currency symbol, the category vocabularies offered in menus, the static
//! tips, and whether the audit log is written.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;
use crate::models::TransactionType;

/// Settings persisted in `config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol appended to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Categories offered when recording an expense
    #[serde(default = "default_expense_categories")]
    pub expense_categories: Vec<String>,

    /// Categories offered when recording an income
    #[serde(default = "default_income_categories")]
    pub income_categories: Vec<String>,

    /// Static money-management tips
    #[serde(default = "default_tips")]
    pub tips: Vec<String>,

    /// Whether created transactions and reminders go to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₽".to_string()
}

fn default_expense_categories() -> Vec<String> {
    ["еда", "транспорт", "развлечения", "коммуналка", "другое"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_income_categories() -> Vec<String> {
    ["зарплата", "подарок", "другое"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_tips() -> Vec<String> {
    [
        "Track your expenses every day",
        "Set aside 10-20% of your income",
        "Use the 50/30/20 rule",
        "Review your spending every week",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            expense_categories: default_expense_categories(),
            income_categories: default_income_categories(),
            tips: default_tips(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Category vocabulary for a transaction type
    pub fn categories_for(&self, kind: TransactionType) -> &[String] {
        match kind {
            TransactionType::Income => &self.income_categories,
            TransactionType::Expense => &self.expense_categories,
        }
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
