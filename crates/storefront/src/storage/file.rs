//! File-backed storage backend.
//!
//! All entries live in one JSON object (`{"key": "serialized blob", ...}`).
//! The file is read once at open; every write rewrites it through a sibling
//! temp file followed by a rename, so a crash mid-write leaves the previous
//! version intact.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::{KeyValueStorage, StorageError};

/// Persistent storage in a single JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or lazily create) the storage file at `path`.
    ///
    /// A missing or empty file yields empty storage; the file and its parent
    /// directories are created on the first write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read, and
    /// `StorageError::Corrupt` if it is not a JSON object of strings.
    #[instrument(skip_all)]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        debug!(path = %path.display(), keys = entries.len(), "Opened storage file");

        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `entries` to disk, then make them the live state.
    ///
    /// On failure neither the file nor the in-memory entries change.
    fn commit(&self, entries: BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let encoded = serde_json::to_string_pretty(&entries)?;
        let tmp = self.temp_path();
        let written = write_synced(&tmp, encoded.as_bytes())
            .and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(source) = written {
            // Best effort; the temp file may not exist.
            let _ = fs::remove_file(&tmp);
            return Err(io_err(source));
        }

        *self.entries.borrow_mut() = entries;
        debug!(path = %self.path.display(), "Committed storage file");
        Ok(())
    }

    /// Hidden per-process sibling of the data file, e.g.
    /// `.storage.json.tmp.1234`.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map_or_else(|| "storage".into(), |name| name.to_string_lossy());
        self.path
            .with_file_name(format!(".{name}.tmp.{}", std::process::id()))
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut next = self.entries.borrow().clone();
        next.insert(key.to_owned(), value);
        self.commit(next)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.entries.borrow().contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.borrow().clone();
        next.remove(key);
        self.commit(next)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("storage.json")).unwrap();
        assert!(storage.keys().unwrap().is_empty());
        // Nothing written yet
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_writes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("users", "[]".to_owned()).unwrap();
        storage.set("orders", "[1]".to_owned()).unwrap();
        storage.remove("orders").unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("users").unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("orders").unwrap(), None);
        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("storage.json")]);
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let storage = FileStorage::open(&path).unwrap();
        storage.set("users", "[]".to_owned()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        // A directory squatting on the temp name makes the write fail
        fs::create_dir(storage.temp_path()).unwrap();

        let err = storage.set("users", "[1]".to_owned()).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert_eq!(storage.get("users").unwrap().as_deref(), Some("[]"));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn test_temp_path_is_distinct_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let tmp_named = FileStorage::open(dir.path().join("x.tmp")).unwrap();
        assert_ne!(tmp_named.temp_path(), tmp_named.path());
        assert_eq!(tmp_named.temp_path().parent(), Some(dir.path()));

        let json = FileStorage::open(dir.path().join("a.json")).unwrap();
        let yaml = FileStorage::open(dir.path().join("a.yaml")).unwrap();
        assert_ne!(json.temp_path(), yaml.temp_path());

        tmp_named.set("k", "v".to_owned()).unwrap();
        let reopened = FileStorage::open(dir.path().join("x.tmp")).unwrap();
        assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        let err = FileStorage::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "\n").unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert!(storage.keys().unwrap().is_empty());
    }
}
