use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::context::ContextKey;
use crate::record::SavedRecord;

use super::{RecordStore, StoreError};

/// Record store backed by a single JSON document on disk.
///
/// The whole document is rewritten on every change. Records are small text
/// buffers and writes are already debounced, so this stays cheap.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Default filename for the records document.
    pub const DEFAULT_FILENAME: &'static str = "autosave-records.json";

    /// Open a store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the default records path in the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(data_dir) = dirs::data_dir() {
            Some(
                data_dir
                    .join("playground-autosave")
                    .join(Self::DEFAULT_FILENAME),
            )
        } else {
            dirs::home_dir().map(|home| {
                home.join(".local")
                    .join("share")
                    .join("playground-autosave")
                    .join(Self::DEFAULT_FILENAME)
            })
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<ContextKey, SavedRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = std::fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&json)?)
    }

    fn write(&self, records: &BTreeMap<ContextKey, SavedRecord>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, json)?;
        log::trace!("Wrote {} records to {:?}", records.len(), self.path);
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    async fn get(&self, key: &ContextKey) -> Result<Option<SavedRecord>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    async fn put(&mut self, record: &SavedRecord) -> Result<(), StoreError> {
        let mut records = self.load()?;
        records.insert(record.id.clone(), record.clone());
        self.write(&records)
    }

    async fn delete(&mut self, key: &ContextKey) -> Result<(), StoreError> {
        let mut records = self.load()?;
        if records.remove(key).is_some() {
            self.write(&records)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, JsonFileStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("records.json"));
        (dir, store)
    }

    #[test]
    fn test_get_from_missing_file() {
        let (_dir, store) = temp_store();
        let key = ContextKey::for_language("python");
        assert!(block_on(store.get(&key)).unwrap().is_none());
    }

    #[test]
    fn test_records_survive_reopen() {
        let (_dir, mut store) = temp_store();
        let key = ContextKey::for_language("python");
        block_on(store.put(&SavedRecord::new(key.clone(), "python", None, "print(1)"))).unwrap();

        let reopened = JsonFileStore::new(store.path());
        let record = block_on(reopened.get(&key)).unwrap().unwrap();
        assert_eq!(record.content, "print(1)");
        assert_eq!(record.language, "python");
    }

    #[test]
    fn test_delete_keeps_other_keys() {
        let (_dir, mut store) = temp_store();
        let python = ContextKey::for_language("python");
        let go = ContextKey::for_language("go");
        block_on(store.put(&SavedRecord::new(python.clone(), "python", None, "a"))).unwrap();
        block_on(store.put(&SavedRecord::new(go.clone(), "go", None, "b"))).unwrap();

        block_on(store.delete(&python)).unwrap();
        block_on(store.delete(&python)).unwrap();

        assert!(block_on(store.get(&python)).unwrap().is_none());
        assert!(block_on(store.get(&go)).unwrap().is_some());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{ not json").unwrap();

        let result = block_on(store.get(&ContextKey::for_language("go")));
        assert!(matches!(result, Err(StoreError::Json(_))));
    }
}
