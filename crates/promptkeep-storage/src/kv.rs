use std::future::Future;
use std::pin::Pin;

use tokio::sync::broadcast;

use crate::error::StorageError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Capacity of the change broadcast. Slow subscribers miss old
/// notifications but always see a later one.
pub const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Notification that a top-level key was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub key: String,
}

/// Persistent key-value store shared between execution contexts.
///
/// Values are JSON documents. Every successful `set` publishes a
/// [`StoreChange`] to all subscribers.
///
/// Methods return boxed futures for dyn compatibility.
pub trait KvStore: Send + Sync {
    /// Read a key. `Ok(None)` if it has never been written.
    fn get<'a>(
        &'a self,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Option<serde_json::Value>, StorageError>>;

    /// Replace the value under a key.
    fn set<'a>(
        &'a self,
        key: &'a str,
        value: serde_json::Value,
    ) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Subscribe to change notifications for all keys.
    fn subscribe(&self) -> broadcast::Receiver<StoreChange>;
}
