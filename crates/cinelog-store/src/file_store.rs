use std::{
    io::Write as _,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;
use tokio::{fs, task::spawn_blocking};
use tracing::{debug, error, warn};

use super::{
    CollectionStore, WriteGuard, decode_collection, encode_collection,
    error::{StoreError, StoreResult},
};

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Writes data to temporary file in the same directory and then renames it over final path,
/// so the final file is either old or new, never partial
fn write_atomically(path: &Path, data: &[u8]) -> StoreResult<()> {
    if path.is_dir() {
        error!("Data path is a directory: {path:?}");
        return Err(StoreError::InvalidPath);
    }
    let dir = parent_dir(path);
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

struct JsonFileStoreInner {
    path: PathBuf,
    lock: tokio::sync::Mutex<()>,
}

/// Collection stored as one pretty printed JSON array in a file
#[derive(Clone)]
pub struct JsonFileStore {
    inner: Arc<JsonFileStoreInner>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(JsonFileStoreInner {
                path: path.into(),
                lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

impl CollectionStore for JsonFileStore {
    async fn load<T: DeserializeOwned>(&self) -> Vec<T> {
        let path = &self.inner.path;
        match fs::read(path).await {
            Ok(data) => decode_collection(&data, &path.to_string_lossy()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Data file {path:?} does not exist yet");
                Vec::new()
            }
            Err(e) => {
                warn!("Cannot read data file {path:?}, using empty collection: {e}");
                Vec::new()
            }
        }
    }

    async fn save<T: Serialize + Sync>(&self, records: &[T]) -> StoreResult<()> {
        let data = encode_collection(records)?;
        let path = self.inner.path.clone();
        let size = data.len();
        spawn_blocking(move || write_atomically(&path, &data))
            .await?
            .inspect_err(|e| error!("Failed to save data to {:?}: {e}", self.inner.path))?;
        debug!(
            "Saved {} records ({size} bytes) to {:?}",
            records.len(),
            self.inner.path
        );
        Ok(())
    }

    async fn exists(&self) -> StoreResult<bool> {
        let exists = fs::try_exists(&self.inner.path).await?;
        Ok(exists)
    }

    async fn write_lock(&self) -> WriteGuard<'_> {
        self.inner.lock.lock().await
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: i64,
        name: String,
    }

    fn items() -> Vec<Item> {
        vec![
            Item {
                id: 1,
                name: "jedna".into(),
            },
            Item {
                id: 2,
                name: "dva".into(),
            },
        ]
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 3)]
    async fn test_save_load() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(tmp_dir.path().join("data/items.json"));
        assert!(!store.exists().await.unwrap());
        let loaded: Vec<Item> = store.load().await;
        assert!(loaded.is_empty());

        let store2 = store.clone();
        // store must be movable to other thread
        let handle = tokio::spawn(async move { store2.save(&items()).await });
        handle.await.unwrap().unwrap();
        assert!(store.exists().await.unwrap());

        let loaded: Vec<Item> = store.load().await;
        assert_eq!(loaded, items());

        let content = fs::read_to_string(store.path()).await.unwrap();
        assert!(content.starts_with("[\n  {\n    \"id\": 1,"));
    }

    #[tokio::test]
    async fn test_overwrite() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(tmp_dir.path().join("items.json"));
        store.save(&items()).await.unwrap();
        store.save(&items()[1..]).await.unwrap();
        let loaded: Vec<Item> = store.load().await;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 2);

        // no temporary files left behind
        let mut entries = fs::read_dir(tmp_dir.path()).await.unwrap();
        let mut count = 0;
        while let Some(_entry) = entries.next_entry().await.unwrap() {
            count += 1;
        }
        assert_eq!(count, 1);
    }

    #[tracing_test::traced_test]
    #[tokio::test]
    async fn test_corrupted_file() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("items.json");
        fs::write(&path, b"[{\"id\": 1, \"name\":").await.unwrap();
        let store = JsonFileStore::new(&path);
        let loaded: Vec<Item> = store.load().await;
        assert!(loaded.is_empty());
        assert!(logs_contain("Corrupted data"));
        assert!(store.exists().await.unwrap());

        store.save(&items()).await.unwrap();
        let loaded: Vec<Item> = store.load().await;
        assert_eq!(loaded, items());
    }

    #[tokio::test]
    async fn test_save_to_directory_fails() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(tmp_dir.path());
        let res = store.save(&items()).await;
        assert!(matches!(res, Err(StoreError::InvalidPath)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 3)]
    async fn test_write_lock_shared() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(tmp_dir.path().join("items.json"));
        let store2 = store.clone();
        let guard = store.write_lock().await;
        let waiting = tokio::spawn(async move {
            let _guard = store2.write_lock().await;
        });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!waiting.is_finished());
        drop(guard);
        waiting.await.unwrap();
    }
}
