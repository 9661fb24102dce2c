//! Audit logging for the finance tracker
//!
//! Every transaction and reminder that gets recorded is also appended to an
//! audit log in line-delimited JSON (JSONL), one entry per line.
//!
//! - `AuditEntry`: a single record with timestamp, user, entity type and the
//!   entity as it was stored.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_tracker::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(EntityType::Transaction, &user_id, &txn))?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType};
pub use logger::AuditLogger;
