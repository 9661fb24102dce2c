//! Storage layer for the finance tracker
//!
//! One JSON document holds every user's record. The `Storage` value is opened
//! once at start-up, handed by reference to the services, and closed at
//! shutdown, which saves whatever memory holds that the file does not.

pub mod file_io;
pub mod users;

pub use file_io::{read_json, write_json_atomic};
pub use users::{load_users, save_users, UserMap, UserRepository};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::FinancePaths;
use crate::error::FinanceError;
use crate::models::UserId;

/// Storage coordinator: user records plus the audit log
pub struct Storage {
    paths: FinancePaths,
    pub users: UserRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a Storage instance without reading anything from disk
    pub fn new(paths: FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.data_file()),
            audit: Some(AuditLogger::new(paths.audit_log())),
            paths,
        })
    }

    /// Create a Storage instance and load the persisted records
    pub fn open(paths: FinancePaths) -> Result<Self, FinanceError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        info!(
            path = %storage.paths.data_file().display(),
            users = storage.users.count()?,
            "storage opened"
        );
        Ok(storage)
    }

    /// Turn audit logging off (or back on)
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit = enabled.then(|| AuditLogger::new(self.paths.audit_log()));
        self
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    /// Get the audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), FinanceError> {
        self.users.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FinanceError> {
        self.users.save()
    }

    /// Close the storage, saving only if there are unsaved changes
    pub fn close(self) -> Result<(), FinanceError> {
        if self.users.is_dirty() {
            self.save_all()?;
            info!("storage closed with a final save");
        } else {
            debug!("storage closed, nothing to save");
        }
        Ok(())
    }

    /// Record the creation of an entity in the audit log
    ///
    /// The entity is already persisted when this runs, so a failing audit
    /// write is logged and not returned.
    pub fn log_create<T: Serialize>(&self, entity_type: EntityType, user_id: &UserId, entity: &T) {
        if let Some(logger) = &self.audit {
            let entry = AuditEntry::create(entity_type, user_id, entity);
            if let Err(e) = logger.log(&entry) {
                warn!(error = %e, entity = %entity_type, "failed to write audit entry");
            }
        }
    }
}
