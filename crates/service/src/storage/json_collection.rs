use std::{collections::HashMap, hash::Hash, path::{Path, PathBuf}, sync::Arc};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

/// A collection of documents keyed by id, persisted as one JSON file.
///
/// Every mutation rewrites the file before returning, so a successful call
/// means the document is on disk. Writes hold the lock until the file is
/// replaced, which keeps snapshots in mutation order.
pub struct JsonCollection<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonCollection<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the collection at `path`, creating an empty file if missing.
    /// A file that exists but does not parse is an error, never silently reset.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.map_err(storage_err)?;
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Storage(format!("{}: {}", file_path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: HashMap<K, V> = HashMap::new();
                write_atomic(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(storage_err(e)),
        };
        debug!(path = %file_path.display(), documents = map.len(), "collection opened");

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path }))
    }

    /// Snapshot of every document.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// First document matching the predicate.
    pub async fn find<F>(&self, pred: F) -> Option<V>
    where
        F: Fn(&K, &V) -> bool,
    {
        let map = self.inner.read().await;
        map.iter().find(|(k, v)| pred(k, v)).map(|(_, v)| v.clone())
    }

    pub async fn any<F>(&self, pred: F) -> bool
    where
        F: Fn(&K, &V) -> bool,
    {
        let map = self.inner.read().await;
        map.iter().any(|(k, v)| pred(k, v))
    }

    /// Insert or replace a document and persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        let previous = map.insert(key.clone(), value);
        let written = write_atomic(&self.file_path, &*map).await;
        if let Err(e) = written {
            // keep memory consistent with disk
            match previous {
                Some(prev) => map.insert(key, prev),
                None => map.remove(&key),
            };
            return Err(e);
        }
        Ok(())
    }

    /// Replace an existing document; returns `false` without writing when the key is absent.
    pub async fn replace(&self, key: &K, value: V) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        let Some(slot) = map.get_mut(key) else { return Ok(false) };
        let previous = std::mem::replace(slot, value);
        let written = write_atomic(&self.file_path, &*map).await;
        if let Err(e) = written {
            map.insert(key.clone(), previous);
            return Err(e);
        }
        Ok(true)
    }

    /// Remove a document and persist; returns the removed value.
    pub async fn remove(&self, key: &K) -> Result<Option<V>, ServiceError> {
        let mut map = self.inner.write().await;
        let Some(removed) = map.remove(key) else { return Ok(None) };
        let written = write_atomic(&self.file_path, &*map).await;
        if let Err(e) = written {
            map.insert(key.clone(), removed);
            return Err(e);
        }
        Ok(Some(removed))
    }
}

fn storage_err(e: std::io::Error) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

/// Write to a sibling temp file, then rename over the target.
async fn write_atomic<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(value).map_err(|e| ServiceError::Storage(e.to_string()))?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, data).await.map_err(storage_err)?;
    fs::rename(&tmp, path).await.map_err(storage_err)?;
    Ok(())
}
