//! Store key conventions.
//!
//! The whole history lives under one top-level key so that a single
//! change notification covers every mutation.

/// Key holding the ordered entry list, most recent first.
pub const PROMPTS: &str = "prompts";

/// Upper bound on stored entries unless configured otherwise.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;
