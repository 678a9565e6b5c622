//! promptkeep-history
//!
//! The entry store: a bounded, deduplicated, most-recent-first list of
//! captured prompts, persisted under one store key and mutated by a single
//! writer task.

pub mod actor;
pub mod error;
pub mod ops;

pub use crate::actor::{EntryStore, HistorySettings};
pub use crate::error::HistoryError;
pub use crate::ops::{AppendOutcome, ListQuery};
