//! Deciding that the user just sent a prompt.
//!
//! Two independent channels: Enter on an attached editable, and a click on
//! something that looks like a send button. Both are lossy on purpose. A
//! miss is preferable to capturing text that was never a prompt.

use promptkeep_core::models::entry::NewEntry;
use promptkeep_history::EntryStore;

use crate::dom::Document;
use crate::events::KeyDown;
use crate::intent::SendIntentVocabulary;
use crate::locator;

/// Where captured text goes.
pub trait PromptSink {
    /// Hand off a capture. Must not block the page's event loop.
    fn save(&self, draft: NewEntry);
}

impl PromptSink for EntryStore {
    fn save(&self, draft: NewEntry) {
        self.submit(draft);
    }
}

/// Hostname and URL of the page captures come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOrigin {
    pub site: String,
    pub url: Option<String>,
}

impl PageOrigin {
    pub fn new(site: impl Into<String>, url: Option<String>) -> Self {
        Self {
            site: site.into(),
            url,
        }
    }

    /// Attach this origin to captured text.
    pub fn draft(&self, text: impl Into<String>) -> NewEntry {
        let draft = NewEntry::new(text).with_site(self.site.clone());
        match &self.url {
            Some(url) => draft.with_source_url(url.clone()),
            None => draft,
        }
    }
}

/// Closest element at or above `el` that behaves like a button:
/// `<button>`, `role="button"`, or `<input type="submit">`.
pub fn button_like<D: Document>(doc: &D, el: &D::Element) -> Option<D::Element> {
    let mut current = Some(el.clone());
    while let Some(candidate) = current {
        if is_button_like(doc, &candidate) {
            return Some(candidate);
        }
        current = doc.parent(&candidate);
    }
    None
}

fn is_button_like<D: Document>(doc: &D, el: &D::Element) -> bool {
    let tag = doc.tag_name(el);
    if tag.eq_ignore_ascii_case("BUTTON") {
        return true;
    }
    if doc
        .attribute(el, "role")
        .is_some_and(|r| r.trim().eq_ignore_ascii_case("button"))
    {
        return true;
    }
    tag.eq_ignore_ascii_case("INPUT")
        && doc
            .attribute(el, "type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("submit"))
}

/// The label a user sees on a button: its text, or `value` for submit inputs.
pub fn visible_label<D: Document>(doc: &D, button: &D::Element) -> String {
    if doc.tag_name(button).eq_ignore_ascii_case("INPUT") {
        return doc.attribute(button, "value").unwrap_or_default();
    }
    doc.inner_text(button)
}

/// Turns page events into candidate prompt text.
#[derive(Debug, Clone, Default)]
pub struct CaptureTrigger {
    vocabulary: SendIntentVocabulary,
}

impl CaptureTrigger {
    pub fn new(vocabulary: SendIntentVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &SendIntentVocabulary {
        &self.vocabulary
    }

    /// Keystroke channel. `element` is the attached editable the listener
    /// sits on. Returns trimmed text for Enter without modifiers.
    pub fn on_keydown<D: Document>(
        &self,
        doc: &D,
        element: &D::Element,
        key: &KeyDown<D::Element>,
    ) -> Option<String> {
        if !key.is_submit() {
            return None;
        }
        non_empty(locator::read_text(doc, element))
    }

    /// Click channel. Returns the best candidate input's trimmed text when
    /// the click landed on a send-looking button.
    pub fn on_click<D: Document>(&self, doc: &D, target: &D::Element) -> Option<String> {
        let button = button_like(doc, target)?;
        if !self.is_send_button(doc, &button) {
            return None;
        }
        let input = locator::locate(doc);
        if input.is_none() {
            tracing::debug!("send button clicked but no input located");
        }
        non_empty(locator::read_text(doc, &input?))
    }

    /// Whether the button's visible label or `aria-label` reads as "send".
    pub fn is_send_button<D: Document>(&self, doc: &D, button: &D::Element) -> bool {
        self.vocabulary.matches(&visible_label(doc, button))
            || doc
                .attribute(button, "aria-label")
                .is_some_and(|label| self.vocabulary.matches(&label))
    }
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
