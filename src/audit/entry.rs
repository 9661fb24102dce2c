//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Amount, UserId};

/// Types of entities that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Transaction,
    Reminder,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::Reminder => write!(f, "Reminder"),
        }
    }
}

/// A single audit log entry
///
/// Records one created entity. Ledger entries are immutable, so creation is
/// the only operation there is to audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the entity was recorded (UTC)
    pub timestamp: DateTime<Utc>,

    /// Owner of the entity
    pub user_id: UserId,

    /// Type of entity recorded
    pub entity_type: EntityType,

    /// JSON representation of the entity as stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<serde_json::Value>,
}

impl AuditEntry {
    /// Create a new audit entry for a recorded entity
    pub fn create<T: Serialize>(entity_type: EntityType, user_id: &UserId, entity: &T) -> Self {
        Self {
            timestamp: Utc::now(),
            user_id: user_id.clone(),
            entity_type,
            entity: serde_json::to_value(entity).ok(),
        }
    }

    /// One line describing what was recorded, e.g.
    /// `2025-04-03 10:15:00 UTC  user 42  expense 150 in 'транспорт'`
    pub fn summary(&self) -> String {
        let what = self
            .entity
            .as_ref()
            .and_then(|entity| self.describe(entity))
            .unwrap_or_else(|| format!("{} (no details)", self.entity_type));

        format!(
            "{}  user {}  {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.user_id,
            what
        )
    }

    fn describe(&self, entity: &serde_json::Value) -> Option<String> {
        match self.entity_type {
            EntityType::Transaction => Some(format!(
                "{} {} in '{}'",
                entity.get("type")?.as_str()?,
                Amount::new(entity.get("amount")?.as_f64()?),
                entity.get("category")?.as_str()?
            )),
            EntityType::Reminder => Some(format!(
                "reminder '{}'",
                entity.get("text")?.as_str()?
            )),
        }
    }
}
