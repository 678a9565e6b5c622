//! Remote calls into the active tab.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use promptkeep_page::memory::MemoryDocument;
use promptkeep_page::{InsertOutcome, insert};
use promptkeep_storage::BoxFuture;

use crate::error::{InsertError, TabError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Arguments of the insert call, serialized across the context boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertRequest {
    pub text: String,
}

/// Browser-side tab access. Methods return boxed futures for dyn
/// compatibility.
pub trait TabHost: Send + Sync {
    /// The active tab of the current window, if any.
    fn active_tab(&self) -> BoxFuture<'_, Result<Option<TabId>, TabError>>;

    /// Run the injection engine inside `tab`. Completes once the script has
    /// run; nothing about what it did comes back.
    fn run_insert(&self, tab: TabId, request: InsertRequest) -> BoxFuture<'_, Result<(), TabError>>;
}

/// Insert `text` into whatever tab is active.
pub async fn insert_into_active_tab(host: &dyn TabHost, text: &str) -> Result<TabId, InsertError> {
    let tab = host.active_tab().await?.ok_or(InsertError::NoActiveTab)?;
    host.run_insert(
        tab,
        InsertRequest {
            text: text.to_string(),
        },
    )
    .await?;
    tracing::info!(%tab, "insert script ran");
    Ok(tab)
}

#[derive(Default)]
struct LocalTabsInner {
    tabs: BTreeMap<TabId, MemoryDocument>,
    active: Option<TabId>,
    next_id: u32,
}

/// In-process tab host over in-memory documents.
#[derive(Clone, Default)]
pub struct LocalTabs {
    inner: Arc<Mutex<LocalTabsInner>>,
}

impl LocalTabs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `doc` in a new tab and make it active.
    pub async fn open(&self, doc: MemoryDocument) -> TabId {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = TabId(inner.next_id);
        inner.tabs.insert(id, doc);
        inner.active = Some(id);
        id
    }

    /// Returns `false` if `tab` is not open.
    pub async fn activate(&self, tab: TabId) -> bool {
        let mut inner = self.inner.lock().await;
        if !inner.tabs.contains_key(&tab) {
            return false;
        }
        inner.active = Some(tab);
        true
    }

    /// Close `tab`. Closing the active tab leaves no tab active.
    pub async fn close(&self, tab: TabId) -> Option<MemoryDocument> {
        let mut inner = self.inner.lock().await;
        if inner.active == Some(tab) {
            inner.active = None;
        }
        inner.tabs.remove(&tab)
    }

    /// Run `f` against the document open in `tab`.
    pub async fn with_document<R>(
        &self,
        tab: TabId,
        f: impl FnOnce(&mut MemoryDocument) -> R,
    ) -> Option<R> {
        let mut inner = self.inner.lock().await;
        inner.tabs.get_mut(&tab).map(f)
    }
}

impl TabHost for LocalTabs {
    fn active_tab(&self) -> BoxFuture<'_, Result<Option<TabId>, TabError>> {
        Box::pin(async move { Ok(self.inner.lock().await.active) })
    }

    fn run_insert(&self, tab: TabId, request: InsertRequest) -> BoxFuture<'_, Result<(), TabError>> {
        Box::pin(async move {
            let mut inner = self.inner.lock().await;
            let doc = inner.tabs.get_mut(&tab).ok_or(TabError::Closed(tab))?;
            match insert(doc, &request.text) {
                InsertOutcome::Written { kind, .. } => {
                    tracing::debug!(%tab, ?kind, "text written into page input");
                }
                InsertOutcome::Broadcast { cancelled } => {
                    tracing::debug!(%tab, cancelled, "no input in page, insert broadcast");
                }
            }
            Ok(())
        })
    }
}
