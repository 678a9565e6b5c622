//! Pure transformations over the entry list.
//!
//! The actor loads the list, applies one of these, and writes it back.

use jiff::Timestamp;
use promptkeep_core::models::entry::{Entry, NewEntry};

/// What `append` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Text was blank after trimming.
    Empty,
    /// An entry with the same text is already stored.
    Duplicate,
    /// Inserted at the head; `evicted` entries fell off the tail.
    Inserted { evicted: usize },
}

impl AppendOutcome {
    pub fn inserted(&self) -> bool {
        matches!(self, AppendOutcome::Inserted { .. })
    }
}

/// Filter for listing entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: Option<String>,
    pub case_insensitive: bool,
}

impl ListQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            filter: Some(term.into()),
            case_insensitive: true,
        }
    }

    /// Whether `entry` passes the filter. An empty filter accepts everything.
    pub fn accepts(&self, entry: &Entry) -> bool {
        match self.filter.as_deref() {
            None | Some("") => true,
            Some(needle) => entry.matches(needle, self.case_insensitive),
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: None,
            case_insensitive: true,
        }
    }
}

/// Insert a draft at the head unless blank or already present, then
/// truncate to `max_entries`.
pub fn append(
    entries: &mut Vec<Entry>,
    draft: NewEntry,
    created_at: Timestamp,
    max_entries: usize,
) -> AppendOutcome {
    let Some(text) = draft.trimmed_text() else {
        return AppendOutcome::Empty;
    };
    if entries.iter().any(|e| e.text == text) {
        return AppendOutcome::Duplicate;
    }

    let Ok(entry) = Entry::from_draft(draft, created_at) else {
        return AppendOutcome::Empty;
    };
    entries.insert(0, entry);
    let evicted = truncate(entries, max_entries);
    AppendOutcome::Inserted { evicted }
}

/// Drop entries past `max_entries` from the tail. Returns how many went.
pub fn truncate(entries: &mut Vec<Entry>, max_entries: usize) -> usize {
    let excess = entries.len().saturating_sub(max_entries);
    entries.truncate(max_entries);
    excess
}

/// Remove the entry at `index`, keeping the order of the rest.
pub fn delete_at(entries: &mut Vec<Entry>, index: usize) -> Option<Entry> {
    (index < entries.len()).then(|| entries.remove(index))
}

/// Entries matching `query`, head to tail.
pub fn filter(entries: Vec<Entry>, query: &ListQuery) -> Vec<Entry> {
    entries.into_iter().filter(|e| query.accepts(e)).collect()
}
