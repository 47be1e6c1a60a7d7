#![allow(async_fn_in_trait)]
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

pub mod error;
pub mod file_store;
pub mod memory_store;

pub use error::{StoreError, StoreResult};
pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;

/// Guard held by the single writer for the whole load - modify - save sequence
pub type WriteGuard<'a> = tokio::sync::MutexGuard<'a, ()>;

/// Durable storage of a whole collection of records, always read and written as one unit.
///
/// Readers see either the previous or the new state, never a partially written one.
pub trait CollectionStore {
    /// Loads all records. Missing or unreadable data is an empty collection, never an error.
    async fn load<T: DeserializeOwned>(&self) -> Vec<T>;
    /// Replaces all stored records with `records`
    async fn save<T: Serialize + Sync>(&self, records: &[T]) -> StoreResult<()>;
    /// True if any data was ever saved (even an empty collection)
    async fn exists(&self) -> StoreResult<bool>;
    /// Serializes writers, all clones of a store share the same lock
    async fn write_lock(&self) -> WriteGuard<'_>;
}

/// Decodes persisted collection, corrupted data is logged and treated as empty
pub(crate) fn decode_collection<T: DeserializeOwned>(data: &[u8], source: &str) -> Vec<T> {
    serde_json::from_slice(data)
        .inspect_err(|e| warn!("Corrupted data in {source}, using empty collection: {e}"))
        .unwrap_or_default()
}

pub(crate) fn encode_collection<T: Serialize>(records: &[T]) -> StoreResult<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(records)?;
    data.push(b'\n');
    Ok(data)
}
