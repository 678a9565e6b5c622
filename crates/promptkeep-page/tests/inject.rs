use promptkeep_page::dom::Visibility;
use promptkeep_page::events::INSERT_EVENT;
use promptkeep_page::locator;
use promptkeep_page::memory::{Dispatched, MemoryDocument};
use promptkeep_page::{EditableKind, InsertOutcome, insert};

#[test]
fn writes_into_focused_input_first() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let _first = doc.textarea(body);
    let focused = doc.content_editable(body);
    doc.set_focus(Some(focused));

    let outcome = insert(&mut doc, "Write a haiku");
    assert_eq!(
        outcome,
        InsertOutcome::Written {
            element: focused,
            kind: EditableKind::ContentEditable
        }
    );
    assert_eq!(doc.own_text(focused), "Write a haiku");
    assert_eq!(doc.dispatched(), &[Dispatched::Input { target: focused }]);
}

#[test]
fn scans_in_priority_order_without_focus() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let editable = doc.content_editable(body);
    let input = doc.text_input(body);
    let hidden = doc.textarea(body);
    doc.set_visibility(hidden, Visibility::Hidden);

    let outcome = insert(&mut doc, "hello");
    assert_eq!(
        outcome,
        InsertOutcome::Written {
            element: input,
            kind: EditableKind::TextInput
        }
    );
    assert_eq!(locator::read_text(&doc, &input), "hello");
    assert_eq!(doc.own_text(editable), "");
}

#[test]
fn replaces_existing_text() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let textarea = doc.textarea(body);
    doc.type_value(textarea, "half-typed draft");

    insert(&mut doc, "replacement");
    assert_eq!(locator::read_text(&doc, &textarea), "replacement");
}

#[test]
fn failed_write_falls_through_to_next_kind() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let locked = doc.textarea(body);
    doc.freeze(locked);
    doc.set_focus(Some(locked));
    let editable = doc.content_editable(body);

    let outcome = insert(&mut doc, "hello");
    assert_eq!(
        outcome,
        InsertOutcome::Written {
            element: editable,
            kind: EditableKind::ContentEditable
        }
    );
}

#[test]
fn markup_is_inserted_as_literal_text() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let editable = doc.content_editable(body);
    let payload = "<script>alert(1)</script>";

    insert(&mut doc, payload);
    assert_eq!(doc.own_text(editable), payload);
    assert!(doc.children(editable).is_empty());
}

#[test]
fn broadcasts_once_when_nothing_is_writable() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let button = doc.button(body, "Send");
    let locked = doc.textarea(body);
    doc.freeze(locked);
    let before = doc.mutation_count();

    let outcome = insert(&mut doc, "Explain recursion");
    assert_eq!(outcome, InsertOutcome::Broadcast { cancelled: false });
    assert_eq!(doc.mutation_count(), before);
    assert_eq!(doc.own_text(button), "Send");

    let events = doc.custom_events();
    assert_eq!(events.len(), 1);
    let event = events[0];
    assert_eq!(event.name, INSERT_EVENT);
    assert_eq!(event.text, "Explain recursion");
    assert!(event.bubbles);
    assert!(event.cancelable);
    assert_eq!(
        event.detail(),
        serde_json::json!({ "text": "Explain recursion" })
    );
}

#[test]
fn broadcast_reports_page_integration_cancel() {
    let mut doc = MemoryDocument::new();
    doc.handle_event(INSERT_EVENT);

    let outcome = insert(&mut doc, "hi");
    assert_eq!(outcome, InsertOutcome::Broadcast { cancelled: true });
}

#[test]
fn detached_page_is_not_an_error() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    doc.textarea(body);
    doc.detach();

    let outcome = insert(&mut doc, "hi");
    assert_eq!(outcome, InsertOutcome::Broadcast { cancelled: false });
    assert!(doc.custom_events().is_empty());
}
