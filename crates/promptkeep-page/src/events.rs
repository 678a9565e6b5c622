//! Page events the content script reacts to, and the custom event names
//! shared with page integrations.

/// Fired on the document when nothing writable was found for an insert.
pub const INSERT_EVENT: &str = "promptSaverInsert";

/// Listened for on the page as a manual-save hook.
pub const SAVE_EVENT: &str = "promptSaverSave";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDown<E> {
    pub target: E,
    /// `KeyboardEvent.key`, e.g. `"Enter"`.
    pub key: String,
    pub modifiers: Modifiers,
}

impl<E> KeyDown<E> {
    pub fn new(target: E, key: impl Into<String>) -> Self {
        Self {
            target,
            key: key.into(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Enter with no modifier held.
    pub fn is_submit(&self) -> bool {
        self.key == "Enter" && !self.modifiers.any()
    }
}

/// Everything the host forwards to the content script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent<E> {
    KeyDown(KeyDown<E>),
    Click { target: E },
    /// The body observer saw a child-list change.
    Mutation { added_nodes: usize },
    /// A page dispatched [`SAVE_EVENT`].
    ManualSave { text: String },
    Unload,
}

impl<E> PageEvent<E> {
    /// Build a [`PageEvent::ManualSave`] from a [`SAVE_EVENT`] detail object.
    /// A missing or non-string `text` yields an empty save, which is ignored.
    pub fn manual_save(detail: &serde_json::Value) -> Self {
        let text = detail
            .get("text")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();
        PageEvent::ManualSave { text }
    }
}
