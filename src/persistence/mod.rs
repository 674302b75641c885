//! Save/load persistence over a key-value store
//!
//! Features:
//! - Storage port (`KeyValueStore`) with an in-memory implementation
//! - Progress blob as JSON under a single fixed key
//! - Unreadable data falls back to a fresh start
//! - Failed writes are logged, never raised to the caller

use std::cell::RefCell;
use std::collections::HashMap;

use crate::consts::PROGRESS_STORAGE_KEY;
use crate::progress::GameProgress;

/// Storage failures
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value store (LocalStorage on web)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local store, used natively and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects every write
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Seed a value regardless of the read-only flag
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Unavailable);
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and saves [`GameProgress`] through a [`KeyValueStore`]
pub struct ProgressStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, PROGRESS_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored progress, or a fresh start if absent or unreadable
    pub fn load(&self) -> GameProgress {
        let Some(json) = self.store.get(&self.key) else {
            log::info!("No progress found, starting fresh");
            return GameProgress::new();
        };

        match serde_json::from_str::<GameProgress>(&json) {
            Ok(progress) => {
                let progress = progress.normalized();
                log::info!(
                    "Loaded progress (level {}, {} completed)",
                    progress.level,
                    progress.total_completed
                );
                progress
            }
            Err(e) => {
                log::warn!("Discarding unreadable progress: {}", e);
                GameProgress::new()
            }
        }
    }

    /// Write progress; failures leave the store untouched and are only logged
    pub fn save(&self, progress: &GameProgress) {
        if let Err(e) = self.try_save(progress) {
            log::warn!("Progress not saved: {}", e);
        }
    }

    pub fn try_save(&self, progress: &GameProgress) -> Result<(), StorageError> {
        let json = serde_json::to_string(progress)?;
        self.store.set(&self.key, &json)?;
        log::debug!("Progress saved (level {})", progress.level);
        Ok(())
    }

    /// Persist and return the empty progress
    pub fn reset(&self) -> GameProgress {
        let progress = GameProgress::new();
        self.save(&progress);
        log::info!("Progress reset");
        progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_is_fresh() {
        let store = ProgressStore::new(MemoryStore::new());
        assert_eq!(store.load(), GameProgress::new());
    }

    #[test]
    fn test_load_garbage_is_fresh() {
        let store = ProgressStore::new(MemoryStore::new().with_entry(PROGRESS_STORAGE_KEY, "{not json"));
        assert_eq!(store.load(), GameProgress::new());
    }

    #[test]
    fn test_save_then_load() {
        let store = ProgressStore::new(MemoryStore::new());
        let progress = GameProgress::new()
            .mark_complete("sat-1", 1000.0)
            .increment_attempts("sat-2", 2000.0);
        store.save(&progress);
        assert_eq!(store.load(), progress);
    }

    #[test]
    fn test_reads_camel_case_json_shape() {
        let json = r#"{
            "satellites": {
                "a": {"id": "a", "completed": true, "attempts": 2, "lastAttempt": 1700000000000},
                "b": {"id": "b", "completed": false, "attempts": 1, "lastAttempt": 1700000000500}
            },
            "level": 2,
            "totalCompleted": 1
        }"#;
        let store = ProgressStore::new(MemoryStore::new().with_entry(PROGRESS_STORAGE_KEY, json));
        let progress = store.load();
        assert_eq!(progress.level, 2);
        assert_eq!(progress.total_completed, 1);
        assert_eq!(progress.satellites["a"].attempts, 2);
        assert_eq!(progress.satellites["b"].last_attempt, 1_700_000_000_500.0);
    }

    #[test]
    fn test_load_recounts_drifted_total() {
        let json = r#"{"satellites": {"a": {"id": "a", "completed": true, "attempts": 0, "lastAttempt": 0}}, "level": 0, "totalCompleted": 7}"#;
        let store = ProgressStore::new(MemoryStore::new().with_entry(PROGRESS_STORAGE_KEY, json));
        let progress = store.load();
        assert_eq!(progress.total_completed, 1);
        assert_eq!(progress.level, 1);
    }

    #[test]
    fn test_reset_persists_empty() {
        let store = ProgressStore::new(MemoryStore::new());
        store.save(&GameProgress::new().mark_complete("x", 1.0));
        let reset = store.reset();
        assert_eq!(reset, GameProgress::new());

        let raw = store.store().get(PROGRESS_STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"satellites": {}, "level": 1, "totalCompleted": 0})
        );
    }

    #[test]
    fn test_failed_save_is_swallowed() {
        let store = ProgressStore::new(MemoryStore::read_only());
        store.save(&GameProgress::new().mark_complete("x", 1.0));
        assert!(store.try_save(&GameProgress::new()).is_err());
        assert_eq!(store.load(), GameProgress::new());
    }
}
