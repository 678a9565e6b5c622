use promptkeep_page::capture::{self, CaptureTrigger, PageOrigin};
use promptkeep_page::events::{KeyDown, Modifiers};
use promptkeep_page::intent::SendIntentVocabulary;
use promptkeep_page::memory::MemoryDocument;

#[test]
fn default_vocabulary_matches_send_labels() {
    let vocab = SendIntentVocabulary::default();
    for label in ["Send", "SUBMIT", "Send message", "Ask AI", "Generate", "Reply all"] {
        assert!(vocab.matches(label), "{label}");
    }
    for label in ["Cancel", "Copy", "", "Delete"] {
        assert!(!vocab.matches(label), "{label}");
    }
}

#[test]
fn vocabulary_is_configurable_and_ignores_blank_terms() {
    let vocab = SendIntentVocabulary::new(["  Envoyer ", "", "   "]);
    assert_eq!(vocab.terms(), ["envoyer"]);
    assert!(vocab.matches("ENVOYER le message"));
    assert!(!vocab.matches("Send"));
}

#[test]
fn enter_without_modifiers_captures_trimmed_text() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let textarea = doc.textarea(body);
    doc.type_value(textarea, "  Explain recursion \n");

    let trigger = CaptureTrigger::default();
    let key = KeyDown::new(textarea, "Enter");
    assert_eq!(
        trigger.on_keydown(&doc, &textarea, &key).as_deref(),
        Some("Explain recursion")
    );
}

#[test]
fn modified_enter_and_other_keys_do_not_capture() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let textarea = doc.textarea(body);
    doc.type_value(textarea, "draft");
    let trigger = CaptureTrigger::default();

    let shift = Modifiers {
        shift: true,
        ..Modifiers::default()
    };
    let meta = Modifiers {
        meta: true,
        ..Modifiers::default()
    };
    for key in [
        KeyDown::new(textarea, "Enter").with_modifiers(shift),
        KeyDown::new(textarea, "Enter").with_modifiers(meta),
        KeyDown::new(textarea, "a"),
    ] {
        assert_eq!(trigger.on_keydown(&doc, &textarea, &key), None);
    }
}

#[test]
fn enter_on_blank_input_captures_nothing() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let textarea = doc.textarea(body);
    doc.type_value(textarea, "   ");
    let trigger = CaptureTrigger::default();
    assert_eq!(
        trigger.on_keydown(&doc, &textarea, &KeyDown::new(textarea, "Enter")),
        None
    );
}

#[test]
fn click_inside_send_button_captures_located_input() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let textarea = doc.textarea(body);
    doc.type_value(textarea, "Write a haiku");
    let button = doc.button(body, "");
    let icon = doc.append(button, "span");
    doc.set_own_text(icon, "Send");

    let trigger = CaptureTrigger::default();
    assert_eq!(capture::button_like(&doc, &icon), Some(button));
    assert_eq!(
        trigger.on_click(&doc, &icon).as_deref(),
        Some("Write a haiku")
    );
}

#[test]
fn aria_label_and_role_button_count() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let editable = doc.content_editable(body);
    doc.set_own_text(editable, "from region");
    let fake_button = doc.append(body, "div");
    doc.set_attribute(fake_button, "role", "button");
    doc.set_attribute(fake_button, "aria-label", "Send prompt");
    let svg = doc.append(fake_button, "svg");

    let trigger = CaptureTrigger::default();
    assert_eq!(trigger.on_click(&doc, &svg).as_deref(), Some("from region"));
}

#[test]
fn submit_input_uses_its_value_as_label() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let input = doc.text_input(body);
    doc.type_value(input, "question");
    let submit = doc.append(body, "input");
    doc.set_attribute(submit, "type", "submit");
    doc.set_attribute(submit, "value", "Ask");

    let trigger = CaptureTrigger::default();
    assert_eq!(trigger.on_click(&doc, &submit).as_deref(), Some("question"));
}

#[test]
fn clicks_elsewhere_do_not_capture() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let textarea = doc.textarea(body);
    doc.type_value(textarea, "draft");
    let cancel = doc.button(body, "Cancel");
    let link = doc.append(body, "a");
    doc.set_own_text(link, "Send feedback");

    let trigger = CaptureTrigger::default();
    assert_eq!(trigger.on_click(&doc, &cancel), None);
    // Not button-like, whatever the label says.
    assert_eq!(trigger.on_click(&doc, &link), None);
}

#[test]
fn send_click_with_no_input_captures_nothing() {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let button = doc.button(body, "Send");
    assert_eq!(CaptureTrigger::default().on_click(&doc, &button), None);
}

#[test]
fn origin_is_attached_to_drafts() {
    let origin = PageOrigin::new(
        "chat.example.com",
        Some("https://chat.example.com/c/42".to_string()),
    );
    let draft = origin.draft("hello");
    assert_eq!(draft.site, "chat.example.com");
    assert_eq!(
        draft.source_url.as_deref(),
        Some("https://chat.example.com/c/42")
    );
}
