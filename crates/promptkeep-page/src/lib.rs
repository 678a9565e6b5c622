//! promptkeep-page
//!
//! The page-side engine: decides which element is the chat input, notices
//! when the user sends a prompt, keeps listeners wired as the page mutates,
//! and writes stored text back into a page.
//!
//! Everything here is host-agnostic. A page is reached only through the
//! [`dom::Document`] and [`dom::EventWiring`] traits; [`memory::MemoryDocument`]
//! is the in-process implementation used by tests and local hosts.

pub mod attach;
pub mod capture;
pub mod content;
pub mod dom;
pub mod error;
pub mod events;
pub mod inject;
pub mod intent;
pub mod locator;
pub mod memory;

pub use crate::content::ContentScript;
pub use crate::error::DomError;
pub use crate::inject::{InsertOutcome, insert};
pub use crate::intent::SendIntentVocabulary;
pub use crate::locator::{EditableKind, locate};
