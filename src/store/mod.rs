//! Persistent storage for saved records.
//!
//! The controller only sees the [`RecordStore`] trait. Operations are
//! asynchronous so browser-backed stores can yield to the event loop; the
//! bundled backends complete immediately.
//!
//! ## Backends
//!
//! - [`MemoryStore`]: in-process map, used by tests and as a fallback
//! - [`JsonFileStore`]: one JSON document on disk (native only)
//! - [`LocalStorageStore`]: one `localStorage` entry per record (WASM only)

mod error;
#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;
mod memory;

use std::future::Future;

use crate::context::ContextKey;
use crate::record::SavedRecord;

pub use error::StoreError;
#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;
pub use memory::MemoryStore;

/// Key-value storage of [`SavedRecord`]s keyed by [`ContextKey`].
pub trait RecordStore {
    /// Look up the record for `key`. An absent record is `Ok(None)`.
    fn get(
        &self,
        key: &ContextKey,
    ) -> impl Future<Output = Result<Option<SavedRecord>, StoreError>>;

    /// Insert or overwrite the record stored under `record.id`.
    fn put(&mut self, record: &SavedRecord) -> impl Future<Output = Result<(), StoreError>>;

    /// Remove the record for `key`. Deleting an absent key succeeds.
    fn delete(&mut self, key: &ContextKey) -> impl Future<Output = Result<(), StoreError>>;
}
