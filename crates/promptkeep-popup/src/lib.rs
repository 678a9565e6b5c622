//! promptkeep-popup library root.
//!
//! The presentation layer: lists and edits the saved prompts, copies them,
//! and inserts them into the active tab. Re-exported so the CLI, demos and
//! integration tests drive the same commands.

pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod state;
pub mod tabs;
pub mod watch;
