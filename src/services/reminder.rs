//! Reminder service
//!
//! Append-only storage of free-text reminders. Reminders are kept, never
//! scheduled or delivered.

use chrono::Local;
use tracing::{info, warn};

use crate::audit::EntityType;
use crate::error::FinanceResult;
use crate::models::{Reminder, UserId};
use crate::storage::Storage;

/// Service for reminder management
pub struct ReminderService<'a> {
    storage: &'a Storage,
}

impl<'a> ReminderService<'a> {
    /// Create a new reminder service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Append a reminder dated today and persist it
    ///
    /// Blank text is not added: the result is `Ok(None)` and nothing is
    /// written.
    pub fn add_reminder(&self, user_id: &UserId, text: &str) -> FinanceResult<Option<Reminder>> {
        if !Reminder::is_valid_text(text) {
            warn!(user = %user_id, "ignoring blank reminder text");
            return Ok(None);
        }

        let reminder = Reminder::new(text, Local::now().date_naive());

        self.storage
            .users
            .update(user_id, |record| {
                record.push_reminder(reminder.clone());
                Ok(())
            })?;

        info!(user = %user_id, date = %reminder.created_at, "reminder added");
        self.storage
            .log_create(EntityType::Reminder, user_id, &reminder);

        Ok(Some(reminder))
    }

    /// All reminders of a user in the order they were added
    pub fn list_reminders(&self, user_id: &UserId) -> FinanceResult<Vec<Reminder>> {
        Ok(self
            .storage
            .users
            .get(user_id)?
            .map(|record| record.reminders)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::FinancePaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_reminders_keep_insertion_order() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReminderService::new(&storage);
        let user = UserId::from("1");

        service.add_reminder(&user, "a").unwrap();
        service.add_reminder(&user, "b").unwrap();

        let texts: Vec<_> = service
            .list_reminders(&user)
            .unwrap()
            .into_iter()
            .map(|r| r.text)
            .collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_blank_text_not_added() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReminderService::new(&storage);
        let user = UserId::from("2");

        assert_eq!(service.add_reminder(&user, "   ").unwrap(), None);
        assert!(service.list_reminders(&user).unwrap().is_empty());
        assert!(!storage.paths().data_file().exists());
    }

    #[test]
    fn test_unknown_user_has_no_reminders() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReminderService::new(&storage);

        assert!(service.list_reminders(&UserId::from("nobody")).unwrap().is_empty());
    }

    #[test]
    fn test_reminder_is_dated_and_persisted() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReminderService::new(&storage);
        let user = UserId::from("3");

        let reminder = service.add_reminder(&user, "renew insurance").unwrap().unwrap();
        // YYYY.MM.DD
        assert_eq!(reminder.created_at.len(), 10);
        assert_eq!(&reminder.created_at[4..5], ".");

        let reopened = Storage::open(storage.paths().clone()).unwrap();
        let record = reopened.users.get(&user).unwrap().unwrap();
        assert_eq!(record.reminders, vec![reminder]);
    }

    #[test]
    fn test_reminders_are_per_user() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReminderService::new(&storage);

        service.add_reminder(&UserId::from("a"), "mine").unwrap();
        assert!(service.list_reminders(&UserId::from("b")).unwrap().is_empty());
    }
}
