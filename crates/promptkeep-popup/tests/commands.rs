use std::sync::Arc;

use promptkeep_core::models::entry::NewEntry;
use promptkeep_history::{AppendOutcome, EntryStore, HistorySettings, ListQuery};
use promptkeep_page::events::INSERT_EVENT;
use promptkeep_page::locator;
use promptkeep_page::memory::MemoryDocument;
use promptkeep_popup::clipboard::{ClipboardWriter, MemoryClipboard};
use promptkeep_popup::commands::{self, COPY_FAILED};
use promptkeep_popup::error::{CopyError, TabError};
use promptkeep_popup::render::EntryList;
use promptkeep_popup::state::PopupState;
use promptkeep_popup::tabs::{InsertRequest, LocalTabs, TabHost, TabId};
use promptkeep_storage::{BoxFuture, MemoryStore};

struct BrokenClipboard;

impl ClipboardWriter for BrokenClipboard {
    fn write_text(&self, _text: &str) -> Result<(), CopyError> {
        Err(CopyError::Unavailable("no display".to_string()))
    }
}

/// Reports an active tab that has already gone away.
struct StaleTabs;

impl TabHost for StaleTabs {
    fn active_tab(&self) -> BoxFuture<'_, Result<Option<TabId>, TabError>> {
        Box::pin(async { Ok(Some(TabId(7))) })
    }

    fn run_insert(&self, tab: TabId, _request: InsertRequest) -> BoxFuture<'_, Result<(), TabError>> {
        Box::pin(async move { Err(TabError::Closed(tab)) })
    }
}

fn state_with(
    tabs: Arc<dyn TabHost>,
    clipboard: Arc<dyn ClipboardWriter>,
) -> PopupState {
    let store = EntryStore::spawn(Arc::new(MemoryStore::new()), HistorySettings::default());
    PopupState::new(store, tabs, clipboard)
}

async fn seed(state: &PopupState, texts: &[&str]) {
    for text in texts {
        let outcome = commands::add_entry(state, NewEntry::new(*text).with_site("chat.example.com"))
            .await
            .unwrap();
        assert!(outcome.inserted());
    }
}

fn texts(list: &EntryList) -> Vec<&str> {
    list.rows().iter().map(|r| r.text.as_str()).collect()
}

#[tokio::test]
async fn list_delete_and_clear() {
    let state = state_with(Arc::new(LocalTabs::new()), Arc::new(MemoryClipboard::new()));
    let empty = commands::list_entries(&state, ListQuery::all()).await.unwrap();
    assert!(matches!(empty, EntryList::Empty { .. }));

    seed(&state, &["one", "two", "three"]).await;
    let list = commands::list_entries(&state, ListQuery::all()).await.unwrap();
    assert_eq!(texts(&list), ["three", "two", "one"]);
    assert!(list.rows()[0].meta.starts_with("chat.example.com · "));

    assert!(commands::delete_entry(&state, 1).await.unwrap());
    assert!(!commands::delete_entry(&state, 5).await.unwrap());
    let list = commands::list_entries(&state, ListQuery::all()).await.unwrap();
    assert_eq!(texts(&list), ["three", "one"]);

    commands::clear_entries(&state).await.unwrap();
    let list = commands::list_entries(&state, ListQuery::all()).await.unwrap();
    assert!(list.rows().is_empty());
}

#[tokio::test]
async fn duplicate_add_is_reported() {
    let state = state_with(Arc::new(LocalTabs::new()), Arc::new(MemoryClipboard::new()));
    seed(&state, &["same"]).await;
    let outcome = commands::add_entry(&state, NewEntry::new("  same ")).await.unwrap();
    assert_eq!(outcome, AppendOutcome::Duplicate);
}

#[tokio::test]
async fn entry_text_by_index() {
    let state = state_with(Arc::new(LocalTabs::new()), Arc::new(MemoryClipboard::new()));
    seed(&state, &["older", "newer"]).await;
    assert_eq!(commands::entry_text(&state, 1).await.unwrap(), "older");
    assert!(commands::entry_text(&state, 2).await.is_err());
}

#[tokio::test]
async fn copy_writes_clipboard() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let state = state_with(Arc::new(LocalTabs::new()), clipboard.clone());

    commands::copy_entry(&state, "Write a haiku").await.unwrap();
    assert_eq!(clipboard.contents().as_deref(), Some("Write a haiku"));
}

#[tokio::test]
async fn copy_failure_has_user_message() {
    let state = state_with(Arc::new(LocalTabs::new()), Arc::new(BrokenClipboard));
    let err = commands::copy_entry(&state, "x").await.unwrap_err();
    assert_eq!(err, COPY_FAILED);
}

#[tokio::test]
async fn insert_without_active_tab() {
    let state = state_with(Arc::new(LocalTabs::new()), Arc::new(MemoryClipboard::new()));
    let err = commands::insert_entry(&state, "x").await.unwrap_err();
    assert_eq!(err, "No active tab found.");
}

#[tokio::test]
async fn insert_into_closed_tab_reports_transport_error() {
    let state = state_with(Arc::new(StaleTabs), Arc::new(MemoryClipboard::new()));
    let err = commands::insert_entry(&state, "x").await.unwrap_err();
    assert_eq!(err, "tab 7 is no longer open");
}

#[tokio::test]
async fn insert_writes_into_active_tab() {
    let tabs = LocalTabs::new();
    let mut background = MemoryDocument::new();
    let bg_body = background.body();
    let bg_input = background.textarea(bg_body);
    let background_tab = tabs.open(background).await;

    let mut chat = MemoryDocument::new();
    let body = chat.body();
    let input = chat.textarea(body);
    let chat_tab = tabs.open(chat).await;

    let state = state_with(Arc::new(tabs.clone()), Arc::new(MemoryClipboard::new()));
    let tab = commands::insert_entry(&state, "Explain recursion").await.unwrap();
    assert_eq!(tab, chat_tab);

    let inserted = tabs
        .with_document(chat_tab, |doc| locator::read_text(doc, &input))
        .await;
    assert_eq!(inserted.as_deref(), Some("Explain recursion"));
    let untouched = tabs
        .with_document(background_tab, |doc| locator::read_text(doc, &bg_input))
        .await;
    assert_eq!(untouched.as_deref(), Some(""));
}

#[tokio::test]
async fn insert_into_page_without_inputs_broadcasts() {
    let tabs = LocalTabs::new();
    let tab = tabs.open(MemoryDocument::new()).await;
    let state = state_with(Arc::new(tabs.clone()), Arc::new(MemoryClipboard::new()));

    commands::insert_entry(&state, "hello").await.unwrap();
    let events = tabs
        .with_document(tab, |doc| {
            doc.custom_events()
                .into_iter()
                .map(|e| (e.name.clone(), e.text.clone()))
                .collect::<Vec<_>>()
        })
        .await
        .unwrap();
    assert_eq!(events, [(INSERT_EVENT.to_string(), "hello".to_string())]);
}

#[tokio::test]
async fn closing_active_tab_leaves_none_active() {
    let tabs = LocalTabs::new();
    let first = tabs.open(MemoryDocument::new()).await;
    let second = tabs.open(MemoryDocument::new()).await;
    assert!(tabs.activate(first).await);
    assert!(tabs.close(second).await.is_some());
    assert_eq!(tabs.active_tab().await.unwrap(), Some(first));

    tabs.close(first).await;
    assert_eq!(tabs.active_tab().await.unwrap(), None);
    assert!(!tabs.activate(first).await);
}
