//! Finding, reading and writing "the chat input" on an unknown page.
//!
//! Only geometry and computed style decide visibility. No ARIA or
//! site-specific hints are consulted.

use crate::dom::{Document, Visibility};

/// Elements that can hold user-typed text, in scan priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableKind {
    TextArea,
    TextInput,
    ContentEditable,
}

impl EditableKind {
    pub const SCAN_ORDER: [EditableKind; 3] = [
        EditableKind::TextArea,
        EditableKind::TextInput,
        EditableKind::ContentEditable,
    ];
}

fn is_tag<D: Document>(doc: &D, el: &D::Element, tag: &str) -> bool {
    doc.tag_name(el).eq_ignore_ascii_case(tag)
}

/// A single-line text input. A missing `type` attribute means `text`.
fn is_text_input<D: Document>(doc: &D, el: &D::Element) -> bool {
    is_tag(doc, el, "INPUT")
        && doc
            .attribute(el, "type")
            .is_none_or(|t| t.trim().eq_ignore_ascii_case("text"))
}

/// Root of a content-editable region (`contenteditable="true"` and friends),
/// as opposed to an element that merely inherits editability.
fn is_editing_root<D: Document>(doc: &D, el: &D::Element) -> bool {
    doc.attribute(el, "contenteditable").is_some_and(|v| {
        let v = v.trim().to_ascii_lowercase();
        v.is_empty() || v == "true" || v == "plaintext-only"
    })
}

/// Classify `el`, counting inherited editability. Used for the focused
/// element and for reads and writes.
pub fn editable_kind<D: Document>(doc: &D, el: &D::Element) -> Option<EditableKind> {
    if is_tag(doc, el, "TEXTAREA") {
        Some(EditableKind::TextArea)
    } else if is_text_input(doc, el) {
        Some(EditableKind::TextInput)
    } else if doc.is_content_editable(el) {
        Some(EditableKind::ContentEditable)
    } else {
        None
    }
}

/// Whether `el` is picked up by the document scan for `kind`.
pub fn matches_scan<D: Document>(doc: &D, el: &D::Element, kind: EditableKind) -> bool {
    match kind {
        EditableKind::TextArea => is_tag(doc, el, "TEXTAREA"),
        EditableKind::TextInput => is_text_input(doc, el),
        EditableKind::ContentEditable => is_editing_root(doc, el),
    }
}

/// Rendered with a non-empty box and not hidden by `visibility`/`display`.
pub fn is_visible<D: Document>(doc: &D, el: &D::Element) -> bool {
    if !doc.client_rects(el).iter().any(|r| r.has_area()) {
        return false;
    }
    let style = doc.computed_style(el);
    style.visibility == Visibility::Visible && !style.display_none
}

/// The focused element, if it is a visible editable.
pub fn focused_editable<D: Document>(doc: &D) -> Option<D::Element> {
    let active = doc.active_element()?;
    (editable_kind(doc, &active).is_some() && is_visible(doc, &active)).then_some(active)
}

/// First visible element of `kind` in document order.
pub fn first_visible<D: Document>(doc: &D, kind: EditableKind) -> Option<D::Element> {
    doc.elements()
        .into_iter()
        .find(|el| matches_scan(doc, el, kind) && is_visible(doc, el))
}

/// The best-candidate chat input: the focused editable, else the first
/// visible text-area, text input, then content-editable region.
pub fn locate<D: Document>(doc: &D) -> Option<D::Element> {
    focused_editable(doc).or_else(|| {
        EditableKind::SCAN_ORDER
            .into_iter()
            .find_map(|kind| first_visible(doc, kind))
    })
}

/// Every visible element any scan would pick up, in document order.
pub fn candidates<D: Document>(doc: &D) -> Vec<D::Element> {
    doc.elements()
        .into_iter()
        .filter(|el| {
            EditableKind::SCAN_ORDER
                .into_iter()
                .any(|kind| matches_scan(doc, el, kind))
                && is_visible(doc, el)
        })
        .collect()
}

/// Current text of an editable; empty for anything else.
pub fn read_text<D: Document>(doc: &D, el: &D::Element) -> String {
    match editable_kind(doc, el) {
        Some(EditableKind::TextArea | EditableKind::TextInput) => {
            doc.value(el).unwrap_or_default()
        }
        Some(EditableKind::ContentEditable) => doc.inner_text(el),
        None => String::new(),
    }
}

/// Focus `el`, replace its text, and fire `input` so page frameworks see
/// the change. Returns whether a write strategy applied and succeeded.
pub fn write_text<D: Document>(doc: &mut D, el: &D::Element, text: &str) -> bool {
    let Some(kind) = editable_kind(doc, el) else {
        return false;
    };

    let result = doc.focus(el).and_then(|()| {
        match kind {
            EditableKind::TextArea | EditableKind::TextInput => doc.set_value(el, text)?,
            EditableKind::ContentEditable => doc.set_text_content(el, text)?,
        }
        doc.dispatch_input(el)
    });

    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, ?kind, "write strategy failed");
            false
        }
    }
}
