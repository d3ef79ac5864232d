use std::collections::HashMap;

use crate::context::ContextKey;
use crate::record::SavedRecord;

use super::{RecordStore, StoreError};

/// Record store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<ContextKey, SavedRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow a stored record without going through the async interface.
    pub fn record(&self, key: &ContextKey) -> Option<&SavedRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    async fn get(&self, key: &ContextKey) -> Result<Option<SavedRecord>, StoreError> {
        Ok(self.records.get(key).cloned())
    }

    async fn put(&mut self, record: &SavedRecord) -> Result<(), StoreError> {
        self.records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn delete(&mut self, key: &ContextKey) -> Result<(), StoreError> {
        self.records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;

    #[test]
    fn test_put_overwrites_by_id() {
        let mut store = MemoryStore::new();
        let key = ContextKey::for_language("python");

        block_on(store.put(&SavedRecord::new(key.clone(), "python", None, "a"))).unwrap();
        block_on(store.put(&SavedRecord::new(key.clone(), "python", None, "b"))).unwrap();

        assert_eq!(store.len(), 1);
        let record = block_on(store.get(&key)).unwrap().unwrap();
        assert_eq!(record.content, "b");
    }

    #[test]
    fn test_delete_absent_key_is_ok() {
        let mut store = MemoryStore::new();
        let key = ContextKey::for_language("go");
        assert!(block_on(store.delete(&key)).is_ok());
        assert!(block_on(store.get(&key)).unwrap().is_none());
    }
}
