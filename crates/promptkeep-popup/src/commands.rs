//! Popup commands. Each returns the user-visible message on failure.

use jiff::tz::TimeZone;

use promptkeep_core::models::entry::{Entry, NewEntry};
use promptkeep_history::{AppendOutcome, ListQuery};

use crate::render::{self, EntryList};
use crate::state::PopupState;
use crate::tabs::{self, TabId};

pub const COPY_FAILED: &str = "Copy failed. Try selecting text manually.";

async fn all_entries(state: &PopupState) -> Result<Vec<Entry>, String> {
    state
        .store
        .list(ListQuery::all())
        .await
        .map_err(|e| e.to_string())
}

pub async fn list_entries(state: &PopupState, query: ListQuery) -> Result<EntryList, String> {
    let entries = all_entries(state).await?;
    Ok(render::render(&entries, &query, &TimeZone::system()))
}

/// Text of the entry at `index` in the full history.
pub async fn entry_text(state: &PopupState, index: usize) -> Result<String, String> {
    all_entries(state)
        .await?
        .into_iter()
        .nth(index)
        .map(|e| e.text)
        .ok_or_else(|| format!("no entry at index {index}"))
}

pub async fn add_entry(state: &PopupState, draft: NewEntry) -> Result<AppendOutcome, String> {
    state.store.append(draft).await.map_err(|e| e.to_string())
}

/// Returns `false` when `index` was out of range.
pub async fn delete_entry(state: &PopupState, index: usize) -> Result<bool, String> {
    state
        .store
        .delete_at(index)
        .await
        .map_err(|e| e.to_string())
}

pub async fn clear_entries(state: &PopupState) -> Result<(), String> {
    state.store.clear().await.map_err(|e| e.to_string())
}

pub async fn copy_entry(state: &PopupState, text: &str) -> Result<(), String> {
    state.clipboard.write_text(text).map_err(|e| {
        tracing::error!(error = %e, "clipboard write failed");
        COPY_FAILED.to_string()
    })
}

pub async fn insert_entry(state: &PopupState, text: &str) -> Result<TabId, String> {
    tabs::insert_into_active_tab(state.tabs.as_ref(), text)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "insert into active tab failed");
            e.to_string()
        })
}
