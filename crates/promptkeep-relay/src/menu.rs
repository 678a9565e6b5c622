use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use promptkeep_core::models::entry::NewEntry;
use promptkeep_history::{AppendOutcome, EntryStore};

use crate::error::RelayError;

pub const SAVE_SELECTION_ID: &str = "save-prompt-selection";
pub const SAVE_SELECTION_TITLE: &str = "Save selected text as Prompt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuContext {
    Selection,
    Page,
    Link,
}

/// A context-menu entry as handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub contexts: Vec<MenuContext>,
}

impl MenuItem {
    pub fn save_selection() -> Self {
        Self {
            id: SAVE_SELECTION_ID.to_string(),
            title: SAVE_SELECTION_TITLE.to_string(),
            contexts: vec![MenuContext::Selection],
        }
    }
}

/// Host-side context-menu registry.
pub trait MenuRegistry: Send + Sync {
    fn create(&self, item: &MenuItem) -> Result<(), RelayError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallReason {
    Install,
    Update,
    BrowserUpdate,
}

impl fmt::Display for InstallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InstallReason::Install => "install",
            InstallReason::Update => "update",
            InstallReason::BrowserUpdate => "browser_update",
        };
        f.write_str(s)
    }
}

/// Install/update hook. Registers the save-selection entry; a registry
/// failure (e.g. the entry survived an update) is logged and swallowed.
pub fn on_installed(registry: &dyn MenuRegistry, reason: InstallReason) {
    info!(%reason, "extension installed or updated");

    let item = MenuItem::save_selection();
    if let Err(e) = registry.create(&item) {
        warn!(menu_id = %item.id, error = %e, "could not create context menu");
    }
}

/// A click on one of our context-menu entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuClick {
    pub menu_item_id: String,
    #[serde(default)]
    pub selection_text: Option<String>,
    /// URL of the tab the click happened in.
    #[serde(default)]
    pub tab_url: Option<String>,
}

/// Hostname of `url`, or empty if it does not parse or has no host.
pub fn site_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

/// Save the clicked selection. Returns `None` for other menu entries or a
/// click without a selection.
pub async fn on_menu_clicked(
    store: &EntryStore,
    click: MenuClick,
) -> Result<Option<AppendOutcome>, RelayError> {
    if click.menu_item_id != SAVE_SELECTION_ID {
        return Ok(None);
    }
    let Some(selection) = click.selection_text else {
        return Ok(None);
    };

    let site = click.tab_url.as_deref().map(site_of).unwrap_or_default();
    let draft = NewEntry::new(selection.trim()).with_site(site);
    let draft = match click.tab_url {
        Some(url) => draft.with_source_url(url),
        None => draft,
    };

    let outcome = store.append(draft).await?;
    tracing::debug!(?outcome, "selection saved from context menu");
    Ok(Some(outcome))
}
