//! Progression Store
//!
//! Which levels are unlocked, which are complete, and the best star rating
//! of each. The record is read with merge-with-defaults (a missing or
//! unreadable record is a fresh start) and written back whole after every
//! completed level.
//!
//! Rules:
//! - `unlocked_levels` starts at 1 and never decreases
//! - completing the highest unlocked level (below MAX_LEVELS) unlocks the next
//! - `level_stars` keeps the best rating ever reached

use std::collections::{BTreeMap, BTreeSet};
use ron::ser::PrettyConfig;
use serde::{Serialize, Deserialize};
use crate::config::MAX_LEVELS;
use crate::storage::{Storage, StorageError};
#[cfg(any(test, target_arch = "wasm32"))]
use crate::storage::MemoryStorage;

/// Storage key of the progress record
pub const PROGRESS_KEY: &str = "progress.ron";

/// Display state of a level on the level select screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelStatus {
    Locked,
    Available,
    Complete,
}

impl LevelStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LevelStatus::Locked => "Locked",
            LevelStatus::Available => "Available",
            LevelStatus::Complete => "Complete",
        }
    }
}

/// Persisted progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressRecord {
    /// Highest playable level
    #[serde(alias = "unlockedLevels")]
    pub unlocked_levels: u32,
    #[serde(alias = "completedLevels")]
    pub completed_levels: BTreeSet<u32>,
    /// Best stars (1-3) per completed level
    #[serde(alias = "levelStars")]
    pub level_stars: BTreeMap<u32, u8>,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            unlocked_levels: 1,
            completed_levels: BTreeSet::new(),
            level_stars: BTreeMap::new(),
        }
    }
}

impl ProgressRecord {
    /// Merge a completed level into the record. Returns true if this
    /// completion unlocked a new level.
    pub fn record_completion(&mut self, level: u32, stars: u8) -> bool {
        self.completed_levels.insert(level);

        let best = self.level_stars.entry(level).or_insert(0);
        if stars > *best {
            *best = stars;
        }

        if level == self.unlocked_levels && level < MAX_LEVELS {
            self.unlocked_levels += 1;
            return true;
        }
        false
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= 1 && level <= self.unlocked_levels
    }

    pub fn is_completed(&self, level: u32) -> bool {
        self.completed_levels.contains(&level)
    }

    /// Best stars of a level, 0 if never completed
    pub fn stars(&self, level: u32) -> u8 {
        self.level_stars.get(&level).copied().unwrap_or(0)
    }

    pub fn status(&self, level: u32) -> LevelStatus {
        if !self.is_unlocked(level) {
            LevelStatus::Locked
        } else if self.is_completed(level) {
            LevelStatus::Complete
        } else {
            LevelStatus::Available
        }
    }
}

/// Where progress is read from and written to
pub trait ProgressStore {
    /// Read the stored record. A missing record is not an error.
    fn load(&self) -> Result<ProgressRecord, StorageError>;

    /// Write the full record back
    fn save(&self, record: &ProgressRecord) -> Result<(), StorageError>;

    /// Read the record, falling back to defaults on any failure
    fn load_or_default(&self) -> ProgressRecord {
        match self.load() {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Failed to load progress, starting fresh: {}", e);
                ProgressRecord::default()
            }
        }
    }

    /// Read, merge a completed level, write back. Returns the merged record
    /// even when saving fails.
    fn record_completion(&self, level: u32, stars: u8) -> ProgressRecord {
        let mut record = self.load_or_default();
        if record.record_completion(level, stars) {
            tracing::info!(level = level + 1, "level unlocked");
        }
        match self.save(&record) {
            Ok(()) => tracing::info!(level, stars, "progress saved"),
            Err(e) => tracing::error!("Failed to save progress: {}", e),
        }
        record
    }
}

/// Progress record kept as RON under a storage backend
pub struct StorageProgressStore<S: Storage> {
    storage: S,
}

impl<S: Storage> StorageProgressStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

impl<S: Storage> ProgressStore for StorageProgressStore<S> {
    fn load(&self) -> Result<ProgressRecord, StorageError> {
        let contents = match self.storage.read_string(PROGRESS_KEY) {
            Ok(contents) => contents,
            Err(StorageError::NotFound(_)) => return Ok(ProgressRecord::default()),
            Err(e) => return Err(e),
        };
        let mut record: ProgressRecord = ron::from_str(&contents)
            .map_err(|e| StorageError::SerdeError(e.to_string()))?;
        record.unlocked_levels = record.unlocked_levels.max(1);
        Ok(record)
    }

    fn save(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let config = PrettyConfig::new().depth_limit(2);
        let contents = ron::ser::to_string_pretty(record, config)
            .map_err(|e| StorageError::SerdeError(e.to_string()))?;
        self.storage.write(PROGRESS_KEY, contents.as_bytes())
    }
}

/// Progress that lasts until the process exits
#[cfg(any(test, target_arch = "wasm32"))]
pub type MemoryProgressStore = StorageProgressStore<MemoryStorage>;

#[cfg(any(test, target_arch = "wasm32"))]
impl MemoryProgressStore {
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    #[test]
    fn test_first_completion_unlocks_next() {
        let mut record = ProgressRecord::default();
        assert!(record.record_completion(1, 2));

        assert_eq!(record.unlocked_levels, 2);
        assert_eq!(record.completed_levels, BTreeSet::from([1]));
        assert_eq!(record.level_stars, BTreeMap::from([(1, 2)]));

        // A worse replay keeps the best rating and unlocks nothing
        assert!(!record.record_completion(1, 1));
        assert_eq!(record.stars(1), 2);
        assert_eq!(record.unlocked_levels, 2);

        record.record_completion(1, 3);
        assert_eq!(record.stars(1), 3);
    }

    #[test]
    fn test_replaying_older_level_does_not_unlock() {
        let mut record = ProgressRecord::default();
        record.record_completion(1, 1);
        record.record_completion(2, 1);
        assert_eq!(record.unlocked_levels, 3);
        assert!(!record.record_completion(1, 3));
        assert_eq!(record.unlocked_levels, 3);
    }

    #[test]
    fn test_last_level_unlocks_nothing() {
        let mut record = ProgressRecord {
            unlocked_levels: MAX_LEVELS,
            ..Default::default()
        };
        assert!(!record.record_completion(MAX_LEVELS, 3));
        assert_eq!(record.unlocked_levels, MAX_LEVELS);
    }

    #[test]
    fn test_status() {
        let mut record = ProgressRecord::default();
        record.record_completion(1, 3);
        assert_eq!(record.status(1), LevelStatus::Complete);
        assert_eq!(record.status(2), LevelStatus::Available);
        assert_eq!(record.status(3), LevelStatus::Locked);
        assert_eq!(record.status(0), LevelStatus::Locked);
        assert_eq!(record.stars(2), 0);
    }

    #[test]
    fn test_store_roundtrip_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = StorageProgressStore::new(LocalStorage::with_base_dir(dir.path()));

        assert_eq!(store.load().unwrap(), ProgressRecord::default());

        let merged = store.record_completion(1, 2);
        assert_eq!(store.load().unwrap(), merged);
        assert!(dir.path().join(PROGRESS_KEY).is_file());
    }

    #[test]
    fn test_partial_record_merges_with_defaults() {
        let storage = MemoryStorage::new();
        storage.write(PROGRESS_KEY, b"(completed_levels: [1])").unwrap();
        let store = StorageProgressStore::new(storage);

        let record = store.load().unwrap();
        assert_eq!(record.unlocked_levels, 1);
        assert!(record.is_completed(1));
        assert!(record.level_stars.is_empty());
    }

    /// Backend whose writes always fail (read-only disk, full quota)
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn read(&self, key: &str) -> Result<Vec<u8>, StorageError> {
            Err(StorageError::NotFound(key.to_string()))
        }

        fn write(&self, _key: &str, _data: &[u8]) -> Result<(), StorageError> {
            Err(StorageError::IoError("read-only file system".to_string()))
        }
    }

    #[test]
    fn test_failed_save_returns_merged_record() {
        let store = StorageProgressStore::new(ReadOnlyStorage);

        assert!(matches!(store.save(&ProgressRecord::default()), Err(StorageError::IoError(_))));

        let merged = store.record_completion(1, 3);
        assert_eq!(merged.unlocked_levels, 2);
        assert_eq!(merged.stars(1), 3);

        // Nothing was persisted
        assert_eq!(store.load_or_default(), ProgressRecord::default());
    }

    #[test]
    fn test_corrupt_record_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage.write(PROGRESS_KEY, b"not ron at all {").unwrap();
        let store = StorageProgressStore::new(storage);

        assert!(matches!(store.load(), Err(StorageError::SerdeError(_))));
        assert_eq!(store.load_or_default(), ProgressRecord::default());

        // Completing overwrites the corrupt record
        store.record_completion(1, 1);
        assert_eq!(store.load().unwrap().unlocked_levels, 2);
    }

    #[test]
    fn test_in_memory_store() {
        let store = MemoryProgressStore::in_memory();
        store.record_completion(1, 3);
        store.record_completion(2, 2);
        let record = store.load_or_default();
        assert_eq!(record.unlocked_levels, 3);
        assert_eq!(record.stars(1), 3);
    }
}
