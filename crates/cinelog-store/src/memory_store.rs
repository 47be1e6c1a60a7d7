use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::{Mutex, RwLock};

use super::{CollectionStore, WriteGuard, decode_collection, encode_collection, error::StoreResult};

struct MemoryStoreInner {
    data: RwLock<Option<Vec<u8>>>,
    lock: Mutex<()>,
}

/// Keeps serialized collection in memory, nothing survives the process
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::from_raw(None)
    }

    /// Store pre-filled with raw (possibly invalid) document
    pub fn with_raw(data: impl Into<Vec<u8>>) -> Self {
        Self::from_raw(Some(data.into()))
    }

    fn from_raw(data: Option<Vec<u8>>) -> Self {
        MemoryStore {
            inner: Arc::new(MemoryStoreInner {
                data: RwLock::new(data),
                lock: Mutex::new(()),
            }),
        }
    }

    pub async fn raw(&self) -> Option<Vec<u8>> {
        self.inner.data.read().await.clone()
    }
}

impl CollectionStore for MemoryStore {
    async fn load<T: DeserializeOwned>(&self) -> Vec<T> {
        match self.inner.data.read().await.as_deref() {
            Some(data) => decode_collection(data, "memory store"),
            None => Vec::new(),
        }
    }

    async fn save<T: Serialize + Sync>(&self, records: &[T]) -> StoreResult<()> {
        let data = encode_collection(records)?;
        *self.inner.data.write().await = Some(data);
        Ok(())
    }

    async fn exists(&self) -> StoreResult<bool> {
        Ok(self.inner.data.read().await.is_some())
    }

    async fn write_lock(&self) -> WriteGuard<'_> {
        self.inner.lock.lock().await
    }
}
