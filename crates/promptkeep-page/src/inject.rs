//! Writing stored text back into a page.
//!
//! Runs inside the destination page. Tries the focused input, then the
//! first visible input of each kind, and finally broadcasts the text for
//! page integrations to pick up.

use crate::dom::{CustomEvent, Document};
use crate::events::INSERT_EVENT;
use crate::locator::{self, EditableKind};

/// What an insert did. Nothing crosses back to the caller; this is for logs
/// and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<E> {
    Written { element: E, kind: EditableKind },
    /// No writable input. `cancelled` is whether a page listener claimed
    /// the broadcast; nothing relies on it.
    Broadcast { cancelled: bool },
}

pub fn insert<D: Document>(doc: &mut D, text: &str) -> InsertOutcome<D::Element> {
    if let Some(active) = locator::focused_editable(&*doc) {
        if let Some(outcome) = try_write(doc, active, text) {
            return outcome;
        }
    }

    for kind in EditableKind::SCAN_ORDER {
        let Some(el) = locator::first_visible(&*doc, kind) else {
            continue;
        };
        if let Some(outcome) = try_write(doc, el, text) {
            return outcome;
        }
    }

    broadcast(doc, text)
}

fn try_write<D: Document>(
    doc: &mut D,
    el: D::Element,
    text: &str,
) -> Option<InsertOutcome<D::Element>> {
    let kind = locator::editable_kind(&*doc, &el)?;
    if !locator::write_text(doc, &el, text) {
        return None;
    }
    tracing::debug!(?kind, chars = text.chars().count(), "inserted into input");
    Some(InsertOutcome::Written { element: el, kind })
}

fn broadcast<D: Document>(doc: &mut D, text: &str) -> InsertOutcome<D::Element> {
    let event = CustomEvent {
        name: INSERT_EVENT.to_string(),
        text: text.to_string(),
        bubbles: true,
        cancelable: true,
    };
    match doc.dispatch_custom(event) {
        Ok(not_cancelled) => {
            tracing::debug!(cancelled = !not_cancelled, "no input found, broadcast insert event");
            InsertOutcome::Broadcast {
                cancelled: !not_cancelled,
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "insert broadcast failed");
            InsertOutcome::Broadcast { cancelled: false }
        }
    }
}
