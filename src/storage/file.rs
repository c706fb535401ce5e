//! JSON-file backed key-value store
//!
//! The whole key space lives in one JSON object file. Every write rewrites
//! the file through a temporary sibling and a rename, so a crash mid-write
//! leaves either the old or the new state on disk.

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::kv::{validate_key, KeyValueStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key-value store persisted to a single JSON file
#[derive(Debug)]
pub struct FileStore {
    /// Path to the state file
    path: PathBuf,
    /// In-memory copy of the file contents
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open or create a state file.
    ///
    /// A missing file starts empty. A file that exists but cannot be parsed
    /// is logged and also starts empty; it is replaced on the next write.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e @ StorageError::Corruption { .. }) => {
                tracing::warn!(error = %e, "Ignoring unreadable state file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(path = ?path, keys = entries.len(), "Opened state file");

        Ok(Self { path, entries })
    }

    /// Load the raw key map from disk
    fn read_entries(path: &Path) -> StorageResult<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        // Invalid UTF-8 is reported as corruption
        let content = std::fs::read(path)?;
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }

        serde_json::from_slice(&content).map_err(|e| StorageError::Corruption {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write `entries` to the state file, adopting them in memory only once
    /// they are on disk
    fn persist(&mut self, entries: BTreeMap<String, String>) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(&entries)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;

        self.entries = entries;
        Ok(())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        let mut entries = self.entries.clone();
        entries.insert(key.to_string(), value.to_string());
        self.persist(entries)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut entries = self.entries.clone();
        entries.remove(key);
        self.persist(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("state.json")).unwrap();
        assert_eq!(store.get("eFarmLogs").unwrap(), None);
    }

    #[test]
    fn test_persistence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        // First session: write
        {
            let mut store = FileStore::open(&path).unwrap();
            store.set("pairedSensor", "Sensor-Field-01").unwrap();
            store.set("done_card-1", "1").unwrap();
        }

        // Second session: verify
        {
            let mut store = FileStore::open(&path).unwrap();
            assert_eq!(
                store.get("pairedSensor").unwrap().as_deref(),
                Some("Sensor-Field-01")
            );
            store.remove("done_card-1").unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("done_card-1").unwrap(), None);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("eFarmLogs").unwrap(), None);

        // Next write replaces the corrupt file
        store.set("pairedSensor", "LoRa-GW-7").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("pairedSensor").unwrap().as_deref(),
            Some("LoRa-GW-7")
        );
    }

    #[test]
    fn test_non_utf8_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x7b]).unwrap();

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("eFarmLogs").unwrap(), None);

        store.set("pairedSensor", "SoilProbe-23").unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("pairedSensor").unwrap().as_deref(),
            Some("SoilProbe-23")
        );
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        let mut store = FileStore::open(data.join("state.json")).unwrap();
        store.set("pairedSensor", "Sensor-Field-01").unwrap();

        std::fs::remove_dir_all(&data).unwrap();

        assert!(matches!(
            store.set("pairedSensor", "LoRa-GW-7"),
            Err(StorageError::Io(_))
        ));
        assert!(store.set("done_card-1", "1").is_err());
        assert!(store.remove("pairedSensor").is_err());

        assert_eq!(
            store.get("pairedSensor").unwrap().as_deref(),
            Some("Sensor-Field-01")
        );
        assert_eq!(store.get("done_card-1").unwrap(), None);
    }

    #[test]
    fn test_strict_read_reports_corruption() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let err = FileStore::read_entries(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corruption { .. }));
    }
}
