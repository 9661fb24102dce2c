//! User record repository
//!
//! Holds the whole `user id -> UserRecord` mapping in memory and persists it
//! as one JSON document. Every mutation goes through [`UserRepository::update`],
//! which keeps the write lock across "mutate, save" so concurrent callers
//! cannot lose each other's updates or interleave writes to the file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use tracing::{debug, error};

use crate::error::FinanceError;
use crate::models::{UserId, UserRecord};

use super::file_io::{read_json, write_json_atomic};

/// The persisted mapping, keyed by stringified user id
pub type UserMap = BTreeMap<UserId, UserRecord>;

/// Read the mapping from `path`, or an empty mapping if nothing is stored yet
pub fn load_users(path: &Path) -> Result<UserMap, FinanceError> {
    read_json(path)
}

/// Overwrite the document at `path` with `users`
pub fn save_users(path: &Path, users: &UserMap) -> Result<(), FinanceError> {
    write_json_atomic(path, users)
}

/// Repository for per-user records
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<UserMap>,
    /// Set when memory holds changes the file does not
    dirty: AtomicBool,
}

impl UserRepository {
    /// Create a new, empty repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(UserMap::new()),
            dirty: AtomicBool::new(false),
        }
    }

    /// Replace the in-memory mapping with what is on disk
    pub fn load(&self) -> Result<(), FinanceError> {
        let users = load_users(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        debug!(users = users.len(), path = %self.path.display(), "loaded user records");
        *data = users;
        self.dirty.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Persist the whole in-memory mapping
    pub fn save(&self) -> Result<(), FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        save_users(&self.path, &data)?;
        self.dirty.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Whether there are in-memory changes that have not been saved
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Get a user's record, if one exists
    pub fn get(&self, user_id: &UserId) -> Result<Option<UserRecord>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(user_id).cloned())
    }

    /// Get a user's record, inserting an empty one if absent
    ///
    /// Only the in-memory mapping changes; nothing is saved.
    pub fn get_or_create(&self, user_id: &UserId) -> Result<UserRecord, FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let record = data.entry(user_id.clone()).or_insert_with(|| {
            self.dirty.store(true, Ordering::SeqCst);
            UserRecord::default()
        });
        Ok(record.clone())
    }

    /// Mutate a user's record and persist the mapping in one locked section
    ///
    /// The record is created if absent. If `mutate` fails nothing is saved;
    /// if the save fails, the record is put back the way it was. Either way
    /// the error is returned.
    pub fn update<R, F>(&self, user_id: &UserId, mutate: F) -> Result<R, FinanceError>
    where
        F: FnOnce(&mut UserRecord) -> Result<R, FinanceError>,
    {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let previous = data.get(user_id).cloned();
        let outcome = mutate(data.entry(user_id.clone()).or_default())
            .and_then(|result| save_users(&self.path, &data).map(|()| result));

        match outcome {
            Ok(result) => {
                self.dirty.store(false, Ordering::SeqCst);
                Ok(result)
            }
            Err(e) => {
                if !e.is_validation() {
                    error!(user = %user_id, error = %e, "failed to persist user records, rolling back");
                }
                match previous {
                    Some(record) => {
                        data.insert(user_id.clone(), record);
                    }
                    None => {
                        data.remove(user_id);
                    }
                }
                Err(e)
            }
        }
    }

    /// Number of known users
    pub fn count(&self) -> Result<usize, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, Reminder, Transaction, TransactionType};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, UserRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = UserRepository::new(temp_dir.path().join("finance_data.json"));
        (temp_dir, repo)
    }

    fn sample_record() -> UserRecord {
        let now = NaiveDate::from_ymd_opt(2025, 2, 14)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        let mut record = UserRecord::new();
        record
            .push_transaction(Transaction::new(
                Amount::new(1000.0),
                "зарплата",
                TransactionType::Income,
                now,
            ))
            .unwrap();
        record
            .push_transaction(Transaction::new(
                Amount::new(99.9),
                "еда",
                TransactionType::Expense,
                now,
            ))
            .unwrap();
        record.push_reminder(Reminder::new("pay internet", now.date()));
        record
    }

    #[test]
    fn test_load_without_file_is_empty() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_get_or_create_does_not_save() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::from("5");

        let record = repo.get_or_create(&user).unwrap();
        assert_eq!(record, UserRecord::default());
        assert_eq!(repo.count().unwrap(), 1);
        assert!(!repo.path().exists());

        // Second call returns the same record without inserting again
        repo.get_or_create(&user).unwrap();
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_update_persists() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::from("5");

        let len = repo
            .update(&user, |record| {
                *record = sample_record();
                Ok(record.transactions.len())
            })
            .unwrap();
        assert_eq!(len, 2);

        let reloaded = UserRepository::new(repo.path().to_path_buf());
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(&user).unwrap(), Some(sample_record()));
    }

    #[test]
    fn test_save_load_round_trip() {
        let (temp_dir, _repo) = create_test_repo();
        let path = temp_dir.path().join("round_trip.json");

        let mut users = UserMap::new();
        users.insert(UserId::from("1"), sample_record());
        users.insert(UserId::from("2"), UserRecord::default());

        save_users(&path, &users).unwrap();
        assert_eq!(load_users(&path).unwrap(), users);
    }

    #[test]
    fn test_loads_legacy_document() {
        let (temp_dir, repo) = create_test_repo();
        let json = r#"{
            "123": {
                "transactions": [
                    {"amount": 150.0, "category": "транспорт", "type": "expense", "date": "03.04 10:15"}
                ],
                "categories": {"транспорт": 150.0},
                "reminders": [{"text": "оплатить интернет", "date": "2025.04.03"}]
            }
        }"#;
        std::fs::write(temp_dir.path().join("finance_data.json"), json).unwrap();

        repo.load().unwrap();
        let record = repo.get(&UserId::from(123_i64)).unwrap().unwrap();
        assert_eq!(record.transactions.len(), 1);
        assert_eq!(record.category_totals["транспорт"].value(), 150.0);
        assert_eq!(record.reminders[0].text, "оплатить интернет");
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let repo = UserRepository::new(blocker.join("finance_data.json"));
        let user = UserId::from("1");

        let result = repo.update(&user, |record| {
            *record = sample_record();
            Ok(())
        });
        assert!(result.unwrap_err().is_storage());
        assert_eq!(repo.get(&user).unwrap(), None);
    }

    #[test]
    fn test_failed_mutation_is_not_saved() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::from("1");
        repo.update(&user, |record| {
            *record = sample_record();
            Ok(())
        })
        .unwrap();

        let result: Result<(), FinanceError> = repo.update(&user, |record| {
            record.reminders.clear();
            Err(FinanceError::Validation("rejected".into()))
        });
        assert!(result.unwrap_err().is_validation());
        assert_eq!(repo.get(&user).unwrap(), Some(sample_record()));

        let reloaded = UserRepository::new(repo.path().to_path_buf());
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(&user).unwrap(), Some(sample_record()));
    }

    #[test]
    fn test_dirty_tracking() {
        let (_temp_dir, repo) = create_test_repo();
        let user = UserId::from("1");
        assert!(!repo.is_dirty());

        repo.get_or_create(&user).unwrap();
        assert!(repo.is_dirty());
        repo.save().unwrap();
        assert!(!repo.is_dirty());

        // Existing record: nothing new in memory
        repo.get_or_create(&user).unwrap();
        assert!(!repo.is_dirty());
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let (_temp_dir, repo) = create_test_repo();
        let users: Vec<UserId> = (0..4_i64).map(UserId::from).collect();
        let now = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        std::thread::scope(|scope| {
            for user in &users {
                let repo = &repo;
                scope.spawn(move || {
                    for _ in 0..25 {
                        repo.update(user, |record| {
                            record.push_transaction(Transaction::new(
                                Amount::new(2.0),
                                "еда",
                                TransactionType::Expense,
                                now,
                            ))
                        })
                        .unwrap();
                    }
                });
            }
        });

        let reloaded = UserRepository::new(repo.path().to_path_buf());
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 4);
        for user in &users {
            let record = reloaded.get(user).unwrap().unwrap();
            assert_eq!(record.transactions.len(), 25);
            assert_eq!(record.category_totals["еда"].value(), 50.0);
        }
    }
}
