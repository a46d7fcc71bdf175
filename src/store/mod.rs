pub mod file_store;
pub mod memory;
pub mod schema;

use thiserror::Error;
use tracing::{info, warn};

use crate::store::schema::{PROGRESS_KEY, ProgressRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Opaque string key/value storage.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Load the saved progress. Anything unusable (missing, unreadable,
/// malformed, wrong shape) yields a fresh record instead of an error.
pub fn load_progress(store: &dyn KvStore) -> ProgressRecord {
    match store.get(PROGRESS_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<ProgressRecord>(&raw) {
            Ok(mut record) => {
                record.normalize();
                record
            }
            Err(err) => {
                warn!(%err, "saved progress is malformed, starting fresh");
                ProgressRecord::default()
            }
        },
        Ok(None) => {
            info!("no saved progress, starting fresh");
            ProgressRecord::default()
        }
        Err(err) => {
            warn!(%err, "failed to read saved progress, starting fresh");
            ProgressRecord::default()
        }
    }
}

pub fn save_progress(store: &dyn KvStore, record: &ProgressRecord) -> Result<()> {
    let json = serde_json::to_string(record)?;
    store.set(PROGRESS_KEY, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[test]
    fn test_missing_record_loads_default() {
        let store = MemoryStore::new();
        assert_eq!(load_progress(&store), ProgressRecord::default());
    }

    #[test]
    fn test_malformed_record_loads_default() {
        let store = MemoryStore::new();
        store.set(PROGRESS_KEY, "{not json").unwrap();
        assert_eq!(load_progress(&store), ProgressRecord::default());
    }

    #[test]
    fn test_wrong_shape_loads_default() {
        let store = MemoryStore::new();
        store
            .set(PROGRESS_KEY, r#"{"completedLessons":"all","currentLesson":0}"#)
            .unwrap();
        assert_eq!(load_progress(&store), ProgressRecord::default());
    }

    #[test]
    fn test_read_failure_loads_default() {
        let store = MemoryStore::new();
        store.set(PROGRESS_KEY, r#"{"broken":true}"#).unwrap();
        store.set_failing(true);
        assert_eq!(load_progress(&store), ProgressRecord::default());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let mut record = ProgressRecord::default();
        record.completed_lessons = vec![0, 2];
        record.current_lesson = 2;
        record.stats.total_keystrokes = 40;
        record.stats.correct_keystrokes = 35;
        record.stats.lessons_completed = 2;
        save_progress(&store, &record).unwrap();
        assert_eq!(load_progress(&store), record);
    }

    #[test]
    fn test_duplicate_ids_are_collapsed_on_load() {
        let store = MemoryStore::new();
        store
            .set(
                PROGRESS_KEY,
                r#"{"completedLessons":[1,0,1],"currentLesson":1,"stats":{"totalKeystrokes":3,"correctKeystrokes":3,"lessonsCompleted":3}}"#,
            )
            .unwrap();
        let record = load_progress(&store);
        assert_eq!(record.completed_lessons, vec![1, 0]);
        assert_eq!(record.stats.lessons_completed, 3);
    }

    #[test]
    fn test_inflated_correct_count_is_clamped_on_load() {
        let store = MemoryStore::new();
        store
            .set(
                PROGRESS_KEY,
                r#"{"completedLessons":[0],"currentLesson":0,"stats":{"totalKeystrokes":10,"correctKeystrokes":40,"lessonsCompleted":1}}"#,
            )
            .unwrap();
        let record = load_progress(&store);
        assert_eq!(record.stats.correct_keystrokes, 10);
        assert_eq!(record.overall_accuracy(), 100);
    }
}
