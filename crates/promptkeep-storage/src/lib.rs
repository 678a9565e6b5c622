//! promptkeep-storage
//!
//! Asynchronous key-value store with change notifications. Thin layer the
//! history actor persists through; the backing medium is pluggable.

pub mod error;
pub mod file;
pub mod kv;
pub mod memory;
pub mod state;

pub use crate::error::StorageError;
pub use crate::file::FileStore;
pub use crate::kv::{BoxFuture, KvStore, StoreChange};
pub use crate::memory::MemoryStore;
