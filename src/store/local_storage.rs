use crate::constants::keys::LOCAL_STORAGE_PREFIX;
use crate::context::ContextKey;
use crate::record::SavedRecord;

use super::{RecordStore, StoreError};

/// Record store backed by the browser's `localStorage`.
///
/// Each record is one JSON entry under `playground-autosave:<key>`.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    /// Open the window's `localStorage`.
    pub fn open() -> Result<Self, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::unavailable("No window object available"))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::backend(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| StoreError::unavailable("localStorage not available"))?;
        Ok(Self { storage })
    }

    fn entry_key(key: &ContextKey) -> String {
        format!("{}{}", LOCAL_STORAGE_PREFIX, key)
    }
}

impl RecordStore for LocalStorageStore {
    async fn get(&self, key: &ContextKey) -> Result<Option<SavedRecord>, StoreError> {
        let raw = self
            .storage
            .get_item(&Self::entry_key(key))
            .map_err(|e| StoreError::backend(format!("Failed to read from localStorage: {:?}", e)))?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&mut self, record: &SavedRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string(record)?;
        self.storage
            .set_item(&Self::entry_key(&record.id), &json)
            .map_err(|e| StoreError::backend(format!("Failed to save to localStorage: {:?}", e)))
    }

    async fn delete(&mut self, key: &ContextKey) -> Result<(), StoreError> {
        self.storage
            .remove_item(&Self::entry_key(key))
            .map_err(|e| StoreError::backend(format!("Failed to remove from localStorage: {:?}", e)))
    }
}
