//! JSON document I/O
//!
//! Reads tolerate a missing file; writes go to a sibling temp file which is
//! synced and then renamed over the target, so a crash mid-write leaves the
//! previous document intact.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::FinanceError;

/// Read a JSON document, or `T::default()` when the file does not exist yet
pub fn read_json<T, P>(path: P) -> Result<T, FinanceError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        debug!(path = %path.display(), "no document on disk, starting empty");
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| FinanceError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| FinanceError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Temp file used while replacing `path`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replace the document at `path` with `data`, pretty-printed
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinanceError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FinanceError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| FinanceError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| FinanceError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| FinanceError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| FinanceError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FinanceError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    debug!(path = %path.display(), "document written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    type Doc = BTreeMap<String, Vec<f64>>;

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let doc: Doc = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_write_then_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("finance_data.json");

        let mut doc = Doc::new();
        doc.insert("1".into(), vec![1.0]);
        write_json_atomic(&path, &doc).unwrap();

        doc.insert("2".into(), vec![2.5, 3.0]);
        write_json_atomic(&path, &doc).unwrap();

        let loaded: Doc = read_json(&path).unwrap();
        assert_eq!(loaded, doc);
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = Path::new("/data/finance_data.json");
        assert_eq!(
            temp_path_for(path),
            PathBuf::from("/data/finance_data.json.tmp")
        );
    }

    #[test]
    fn test_corrupt_document_is_storage_error() {
        #[derive(Debug, Default, Deserialize)]
        struct Anything {}

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("finance_data.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Anything, _>(&path).unwrap_err();
        assert!(err.is_storage());
    }

    #[test]
    fn test_write_into_unwritable_parent_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "i am a file").unwrap();

        let result = write_json_atomic(blocker.join("finance_data.json"), &Doc::new());
        assert!(result.unwrap_err().is_storage());
    }
}
