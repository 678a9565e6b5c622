use jiff::Timestamp;
use jiff::tz::TimeZone;

use promptkeep_core::models::entry::Entry;
use promptkeep_history::ListQuery;
use promptkeep_popup::render::{self, EMPTY_PLACEHOLDER, EntryList};

fn entry(text: &str, site: &str) -> Entry {
    Entry {
        text: text.to_string(),
        created_at: "2024-05-01T12:30:00Z".parse::<Timestamp>().unwrap(),
        site: site.to_string(),
        source_url: None,
    }
}

#[test]
fn empty_history_renders_placeholder() {
    let list = render::render(&[], &ListQuery::all(), &TimeZone::UTC);
    assert_eq!(
        list,
        EntryList::Empty {
            message: EMPTY_PLACEHOLDER.to_string()
        }
    );
    assert!(list.rows().is_empty());
    assert_eq!(list.to_string(), "No prompts saved yet.\n");
}

#[test]
fn meta_shows_site_or_local() {
    let tz = TimeZone::UTC;
    assert_eq!(
        render::meta_line(&entry("a", "chat.example.com"), &tz),
        "chat.example.com · 2024-05-01 12:30:00"
    );
    assert_eq!(
        render::meta_line(&entry("a", ""), &tz),
        "local · 2024-05-01 12:30:00"
    );
}

#[test]
fn filtered_rows_keep_history_index() {
    let entries = vec![
        entry("Write a haiku", "poems.example"),
        entry("Explain recursion", "chat.example.com"),
        entry("Fix my SQL", "chat.example.com"),
    ];

    let list = render::render(&entries, &ListQuery::search("CHAT.example"), &TimeZone::UTC);
    let indexes: Vec<_> = list.rows().iter().map(|r| r.index).collect();
    assert_eq!(indexes, [1, 2]);
    assert_eq!(list.rows()[0].text, "Explain recursion");

    let none = render::render(&entries, &ListQuery::search("nothing"), &TimeZone::UTC);
    assert!(matches!(none, EntryList::Empty { .. }));
}

#[test]
fn rows_serialize_with_kind_tag() {
    let list = render::render(&[entry("hi", "")], &ListQuery::all(), &TimeZone::UTC);
    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(json["kind"], "rows");
    assert_eq!(json["rows"][0]["text"], "hi");
    assert_eq!(json["rows"][0]["index"], 0);
}
