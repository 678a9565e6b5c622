//! Capture a prompt on one page and insert it into another, all in process.
//!
//! Usage:
//!   cargo run -p promptkeep-popup --example page_roundtrip

use std::sync::Arc;

use promptkeep_history::{EntryStore, ListQuery};
use promptkeep_page::ContentScript;
use promptkeep_page::capture::{CaptureTrigger, PageOrigin};
use promptkeep_page::events::{KeyDown, PageEvent};
use promptkeep_page::locator;
use promptkeep_page::memory::MemoryDocument;
use promptkeep_popup::clipboard::MemoryClipboard;
use promptkeep_popup::commands;
use promptkeep_popup::config::PromptkeepConfig;
use promptkeep_popup::state::PopupState;
use promptkeep_popup::tabs::LocalTabs;
use promptkeep_storage::MemoryStore;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt().with_env_filter("debug").init();

    let config = PromptkeepConfig::default();
    let store = EntryStore::spawn(Arc::new(MemoryStore::new()), config.history_settings());

    // Source page: type and press Enter.
    let mut chat = MemoryDocument::new();
    let body = chat.body();
    let input = chat.textarea(body);
    let mut script = ContentScript::new(
        store.clone(),
        PageOrigin::new("chat.example.com", None),
        CaptureTrigger::new(config.vocabulary()),
    );
    script.boot(&mut chat);
    chat.type_value(input, "Explain recursion like I'm five");
    script.handle(&mut chat, PageEvent::KeyDown(KeyDown::new(input, "Enter")));

    // Destination page with a rich-text editor.
    let tabs = LocalTabs::new();
    let mut editor = MemoryDocument::new();
    let editor_body = editor.body();
    let region = editor.content_editable(editor_body);
    let tab = tabs.open(editor).await;

    let state = PopupState::new(store, Arc::new(tabs.clone()), Arc::new(MemoryClipboard::new()));
    let list = commands::list_entries(&state, ListQuery::all())
        .await
        .map_err(|e| eyre::eyre!(e))?;
    print!("{list}");

    let Some(row) = list.rows().first() else {
        eyre::bail!("nothing was captured");
    };
    commands::insert_entry(&state, &row.text)
        .await
        .map_err(|e| eyre::eyre!(e))?;

    let inserted = tabs
        .with_document(tab, |doc| locator::read_text(doc, &region))
        .await
        .unwrap_or_default();
    println!("tab {tab} now reads: {inserted}");
    Ok(())
}
