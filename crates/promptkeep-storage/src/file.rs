use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tokio::sync::{Mutex, broadcast};

use crate::error::StorageError;
use crate::kv::{BoxFuture, CHANGE_CHANNEL_CAPACITY, KvStore, StoreChange};

/// Store persisted as a single JSON object on disk.
///
/// The whole object is held in memory and rewritten on every `set`
/// (tmp file + rename), so a crash never leaves a half-written store.
/// Change notifications only reach subscribers in this process.
pub struct FileStore {
    path: PathBuf,
    values: Mutex<Map<String, Value>>,
    changes: broadcast::Sender<StoreChange>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let values = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes)? {
                Value::Object(map) => map,
                _ => {
                    return Err(StorageError::Malformed {
                        path: path.display().to_string(),
                    });
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no store file yet, starting empty");
                Map::new()
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };

        tracing::debug!(path = %path.display(), keys = values.len(), "store opened");

        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(Self {
            path,
            values: Mutex::new(values),
            changes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, values: &Map<String, Value>) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let json = serde_json::to_vec_pretty(values)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &json).await.map_err(io_err)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(io_err)?;

        tracing::debug!(path = %self.path.display(), "store flushed to disk");
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Option<Value>, StorageError>> {
        Box::pin(async move { Ok(self.values.lock().await.get(key).cloned()) })
    }

    fn set<'a>(&'a self, key: &'a str, value: Value) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            let mut values = self.values.lock().await;
            let previous = values.insert(key.to_string(), value);
            if let Err(e) = self.flush(&values).await {
                // Keep memory consistent with disk.
                match previous {
                    Some(v) => values.insert(key.to_string(), v),
                    None => values.remove(key),
                };
                return Err(e);
            }
            drop(values);

            let _ = self.changes.send(StoreChange {
                key: key.to_string(),
            });
            Ok(())
        })
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
