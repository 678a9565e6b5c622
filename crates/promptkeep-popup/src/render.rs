//! Turning the entry list into what the popup shows.

use std::fmt;

use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

use promptkeep_core::models::entry::Entry;
use promptkeep_history::ListQuery;

pub const EMPTY_PLACEHOLDER: &str = "No prompts saved yet.";

/// One row of the list. `index` is the entry's position in the full history,
/// so it stays valid for `delete` when the view is filtered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRow {
    pub index: usize,
    pub text: String,
    pub meta: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryList {
    Empty { message: String },
    Rows { rows: Vec<EntryRow> },
}

impl EntryList {
    pub fn rows(&self) -> &[EntryRow] {
        match self {
            EntryList::Empty { .. } => &[],
            EntryList::Rows { rows } => rows,
        }
    }
}

impl fmt::Display for EntryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryList::Empty { message } => writeln!(f, "{message}"),
            EntryList::Rows { rows } => {
                for row in rows {
                    writeln!(f, "{:>4}  {}", row.index, row.text)?;
                    writeln!(f, "      {}", row.meta)?;
                }
                Ok(())
            }
        }
    }
}

/// `"<site or 'local'> · <local time>"`.
pub fn meta_line(entry: &Entry, tz: &TimeZone) -> String {
    let site = if entry.site.is_empty() {
        "local"
    } else {
        entry.site.as_str()
    };
    let when = entry.created_at.to_zoned(tz.clone());
    format!("{site} · {}", when.strftime("%Y-%m-%d %H:%M:%S"))
}

/// Render the full history (head first), keeping rows `query` accepts.
pub fn render(entries: &[Entry], query: &ListQuery, tz: &TimeZone) -> EntryList {
    let rows: Vec<EntryRow> = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| query.accepts(e))
        .map(|(index, e)| EntryRow {
            index,
            text: e.text.clone(),
            meta: meta_line(e, tz),
        })
        .collect();

    if rows.is_empty() {
        EntryList::Empty {
            message: EMPTY_PLACEHOLDER.to_string(),
        }
    } else {
        EntryList::Rows { rows }
    }
}
