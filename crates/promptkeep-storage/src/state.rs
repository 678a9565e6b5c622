use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::kv::KvStore;

/// Load a JSON value from the store, or `T::default()` if the key is unset.
pub async fn load_state<T: DeserializeOwned + Default>(
    store: &dyn KvStore,
    key: &str,
) -> Result<T, StorageError> {
    match store.get(key).await? {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Ok(T::default()),
    }
}

/// Save a JSON value to the store.
pub async fn save_state<T: Serialize + ?Sized>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let value = serde_json::to_value(value)?;
    store.set(key, value).await
}
