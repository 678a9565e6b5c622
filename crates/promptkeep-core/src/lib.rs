//! promptkeep-core
//!
//! Pure domain types and store key conventions.
//! No I/O and no async runtime: this is the shared vocabulary of the
//! capture, history, relay and popup crates.

pub mod error;
pub mod models;
pub mod store_keys;
