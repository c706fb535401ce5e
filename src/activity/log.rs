//! Bounded activity log
//!
//! A most-recent-first list of [`LogEntry`] kept under a single storage key
//! and capped at [`MAX_ENTRIES`]. Unreadable persisted state is treated as
//! an empty log so a damaged store never blocks recording new actions.

use crate::activity::error::{ActivityError, ActivityResult};
use crate::activity::types::LogEntry;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized log
pub const LOG_KEY: &str = "eFarmLogs";

/// Upper bound on persisted entries
pub const MAX_ENTRIES: usize = 50;

/// Durable, bounded, newest-first log of user actions
#[derive(Debug)]
pub struct ActivityLogStore<S> {
    store: S,
    capacity: usize,
}

impl<S: KeyValueStore> ActivityLogStore<S> {
    /// Create a log over `store` holding at most [`MAX_ENTRIES`] entries
    pub fn new(store: S) -> Self {
        Self {
            store,
            capacity: MAX_ENTRIES,
        }
    }

    /// Create a log with a smaller cap. Clamped to `1..=MAX_ENTRIES`.
    pub fn with_capacity(store: S, capacity: usize) -> Self {
        Self {
            store,
            capacity: capacity.clamp(1, MAX_ENTRIES),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record an action at the front of the log, evicting the oldest
    /// entries past the cap.
    pub fn append(&mut self, action: &str, timestamp: &str) -> ActivityResult<LogEntry> {
        if action.trim().is_empty() {
            return Err(ActivityError::EmptyAction);
        }
        if timestamp.trim().is_empty() {
            return Err(ActivityError::EmptyTimestamp);
        }

        let entry = LogEntry::new(action, timestamp);
        let mut entries = self.read_entries();
        entries.insert(0, entry.clone());
        entries.truncate(self.capacity);

        let json = serde_json::to_string(&entries).map_err(crate::storage::StorageError::from)?;
        self.store.set(LOG_KEY, &json)?;

        tracing::debug!(action = %entry.action, len = entries.len(), "Recorded activity");
        Ok(entry)
    }

    /// All entries, newest first
    pub fn list(&self) -> Vec<LogEntry> {
        self.read_entries()
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delete every entry. Calling this on an empty log is a no-op.
    pub fn clear(&mut self) -> ActivityResult<()> {
        self.store.remove(LOG_KEY)?;
        tracing::info!("Activity log cleared");
        Ok(())
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the underlying store, for state kept under other keys
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read_entries(&self) -> Vec<LogEntry> {
        let raw = match self.store.get(LOG_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read activity log, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<LogEntry>>(&raw) {
            Ok(mut entries) => {
                entries.truncate(self.capacity);
                entries
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored activity log is corrupt, treating as empty");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore, StorageError, StorageResult};
    use tempfile::tempdir;

    fn ts(i: usize) -> String {
        format!("2025-09-18 08:{:02}:00", i % 60)
    }

    #[test]
    fn test_empty_log() {
        let log = ActivityLogStore::new(MemoryStore::new());
        assert!(log.list().is_empty());
        assert!(log.is_empty());
        assert_eq!(log.capacity(), MAX_ENTRIES);
    }

    #[test]
    fn test_newest_first() {
        let mut log = ActivityLogStore::new(MemoryStore::new());
        log.append("first", &ts(0)).unwrap();
        log.append("second", &ts(1)).unwrap();

        let entries = log.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, "second");
        assert_eq!(entries[1].action, "first");
    }

    #[test]
    fn test_length_tracks_min_of_calls_and_cap() {
        let mut log = ActivityLogStore::new(MemoryStore::new());
        for i in 1..=75 {
            log.append(&format!("action {}", i), &ts(i)).unwrap();
            assert_eq!(log.len(), i.min(MAX_ENTRIES));
        }
    }

    #[test]
    fn test_keeps_most_recent_fifty_in_reverse_order() {
        let mut log = ActivityLogStore::new(MemoryStore::new());
        for i in 0..120 {
            log.append(&format!("action {}", i), &ts(i)).unwrap();
        }

        let entries = log.list();
        assert_eq!(entries.len(), 50);
        for (pos, entry) in entries.iter().enumerate() {
            assert_eq!(entry.action, format!("action {}", 119 - pos));
        }
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut log = ActivityLogStore::new(MemoryStore::new());
        log.clear().unwrap();
        assert!(log.list().is_empty());

        log.append("Irrigate field - Light spray for 15 minutes", &ts(0))
            .unwrap();
        log.clear().unwrap();
        log.clear().unwrap();
        assert!(log.list().is_empty());
        assert!(log.store().is_empty());
    }

    #[test]
    fn test_append_clear_append() {
        let mut log = ActivityLogStore::new(MemoryStore::new());
        log.append("before", &ts(0)).unwrap();
        log.clear().unwrap();
        log.append("after", &ts(1)).unwrap();

        let entries = log.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "after");
    }

    #[test]
    fn test_empty_input_rejected_without_mutation() {
        let mut log = ActivityLogStore::new(MemoryStore::new());
        log.append("kept", &ts(0)).unwrap();

        assert!(matches!(
            log.append("   ", &ts(1)),
            Err(ActivityError::EmptyAction)
        ));
        assert!(matches!(
            log.append("dropped", ""),
            Err(ActivityError::EmptyTimestamp)
        ));
        assert_eq!(log.list(), vec![LogEntry::new("kept", ts(0))]);
    }

    #[test]
    fn test_corrupt_state_reads_empty_and_recovers() {
        let mut store = MemoryStore::new();
        store.set(LOG_KEY, "this is not json").unwrap();

        let mut log = ActivityLogStore::new(store);
        assert!(log.list().is_empty());

        log.append("recovered", &ts(0)).unwrap();
        assert_eq!(log.list().len(), 1);
    }

    #[test]
    fn test_wrong_shape_reads_empty() {
        let mut store = MemoryStore::new();
        store.set(LOG_KEY, r#"{"action":"not an array"}"#).unwrap();
        let log = ActivityLogStore::new(store);
        assert!(log.list().is_empty());
    }

    #[test]
    fn test_with_capacity_clamps() {
        let log = ActivityLogStore::with_capacity(MemoryStore::new(), 500);
        assert_eq!(log.capacity(), MAX_ENTRIES);

        let log = ActivityLogStore::with_capacity(MemoryStore::new(), 0);
        assert_eq!(log.capacity(), 1);

        let mut log = ActivityLogStore::with_capacity(MemoryStore::new(), 3);
        for i in 0..5 {
            log.append(&format!("a{}", i), &ts(i)).unwrap();
        }
        let actions: Vec<_> = log.list().into_iter().map(|e| e.action).collect();
        assert_eq!(actions, vec!["a4", "a3", "a2"]);
    }

    /// Store whose reads always fail
    struct FailingReads(MemoryStore);

    impl KeyValueStore for FailingReads {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        }

        fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
            self.0.set(key, value)
        }

        fn remove(&mut self, key: &str) -> StorageResult<()> {
            self.0.remove(key)
        }
    }

    #[test]
    fn test_read_failure_treated_as_empty() {
        let mut log = ActivityLogStore::new(FailingReads(MemoryStore::new()));
        assert!(log.list().is_empty());
        let entry = log.append("still recorded", &ts(0)).unwrap();
        assert_eq!(entry.action, "still recorded");
        assert!(log.store().0.get(LOG_KEY).unwrap().is_some());
    }

    #[test]
    fn test_persists_across_sessions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");

        {
            let mut log = ActivityLogStore::new(FileStore::open(&path).unwrap());
            log.append("Apply fertilizer - NPK blend - 100g per plant", &ts(0))
                .unwrap();
        }

        let log = ActivityLogStore::new(FileStore::open(&path).unwrap());
        let entries = log.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].timestamp, ts(0));
    }

    #[test]
    fn test_failed_write_is_not_listed() {
        let dir = tempdir().unwrap();
        let data = dir.path().join("data");
        let mut log = ActivityLogStore::new(FileStore::open(data.join("state.json")).unwrap());
        log.append("Skip watering - Soil moisture is adequate", &ts(0))
            .unwrap();

        std::fs::remove_dir_all(&data).unwrap();

        let err = log
            .append("Irrigate field - Light spray for 15 minutes", &ts(1))
            .unwrap_err();
        assert!(matches!(err, ActivityError::Storage(_)));
        assert!(log.clear().is_err());

        let entries = log.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "Skip watering - Soil moisture is adequate");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn cap_holds_for_any_append_count(n in 0usize..120, capacity in 1usize..=MAX_ENTRIES) {
                let mut log = ActivityLogStore::with_capacity(MemoryStore::new(), capacity);
                for i in 0..n {
                    log.append(&format!("action {}", i), &ts(i)).unwrap();
                }

                let entries = log.list();
                prop_assert_eq!(entries.len(), n.min(capacity));
                for (pos, entry) in entries.iter().enumerate() {
                    prop_assert_eq!(&entry.action, &format!("action {}", n - 1 - pos));
                }
            }

            #[test]
            fn blank_actions_never_change_state(action in "[ \t]*", prior in 0usize..5) {
                let mut log = ActivityLogStore::new(MemoryStore::new());
                for i in 0..prior {
                    log.append(&format!("action {}", i), &ts(i)).unwrap();
                }

                prop_assert!(log.append(&action, &ts(0)).is_err());
                prop_assert_eq!(log.len(), prior);
            }
        }
    }
}
