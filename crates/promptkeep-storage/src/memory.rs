use std::collections::HashMap;

use tokio::sync::{Mutex, broadcast};

use crate::error::StorageError;
use crate::kv::{BoxFuture, CHANGE_CHANNEL_CAPACITY, KvStore, StoreChange};

/// Process-local store. Used by tests and by hosts that persist elsewhere.
pub struct MemoryStore {
    values: Mutex<HashMap<String, serde_json::Value>>,
    changes: broadcast::Sender<StoreChange>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            values: Mutex::new(HashMap::new()),
            changes,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemoryStore {
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Option<serde_json::Value>, StorageError>> {
        Box::pin(async move { Ok(self.values.lock().await.get(key).cloned()) })
    }

    fn set<'a>(
        &'a self,
        key: &'a str,
        value: serde_json::Value,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.values.lock().await.insert(key.to_string(), value);
            // No subscribers is fine.
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
