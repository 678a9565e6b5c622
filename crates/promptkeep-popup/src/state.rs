use std::sync::Arc;

use promptkeep_history::EntryStore;

use crate::clipboard::ClipboardWriter;
use crate::tabs::TabHost;

/// Everything the popup commands reach.
#[derive(Clone)]
pub struct PopupState {
    pub store: EntryStore,
    pub tabs: Arc<dyn TabHost>,
    pub clipboard: Arc<dyn ClipboardWriter>,
}

impl PopupState {
    pub fn new(
        store: EntryStore,
        tabs: Arc<dyn TabHost>,
        clipboard: Arc<dyn ClipboardWriter>,
    ) -> Self {
        Self {
            store,
            tabs,
            clipboard,
        }
    }
}
