use serde::{Deserialize, Serialize};
use serde_json::json;

use promptkeep_storage::state::{load_state, save_state};
use promptkeep_storage::{FileStore, KvStore, MemoryStore, StorageError};

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Counter {
    hits: u32,
}

#[tokio::test]
async fn memory_store_get_set_and_notify() {
    let store = MemoryStore::new();
    let mut changes = store.subscribe();

    assert_eq!(store.get("prompts").await.unwrap(), None);
    store.set("prompts", json!(["a"])).await.unwrap();
    assert_eq!(store.get("prompts").await.unwrap(), Some(json!(["a"])));

    let change = changes.recv().await.unwrap();
    assert_eq!(change.key, "prompts");
}

#[tokio::test]
async fn load_state_defaults_when_unset() {
    let store = MemoryStore::new();
    let counter: Counter = load_state(&store, "counter").await.unwrap();
    assert_eq!(counter, Counter::default());

    save_state(&store, "counter", &Counter { hits: 3 }).await.unwrap();
    let counter: Counter = load_state(&store, "counter").await.unwrap();
    assert_eq!(counter.hits, 3);
}

#[tokio::test]
async fn file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    {
        let store = FileStore::open(&path).await.unwrap();
        store.set("prompts", json!([{"text": "hi"}])).await.unwrap();
        store.set("other", json!(1)).await.unwrap();
    }

    let reopened = FileStore::open(&path).await.unwrap();
    assert_eq!(
        reopened.get("prompts").await.unwrap(),
        Some(json!([{"text": "hi"}]))
    );
    assert_eq!(reopened.get("other").await.unwrap(), Some(json!(1)));
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn file_store_notifies_subscribers() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("store.json")).await.unwrap();
    let mut changes = store.subscribe();

    store.set("prompts", json!([])).await.unwrap();
    assert_eq!(changes.recv().await.unwrap().key, "prompts");
}

#[tokio::test]
async fn file_store_rejects_non_object_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, b"[1, 2, 3]").unwrap();

    let err = FileStore::open(&path).await.err().unwrap();
    assert!(matches!(err, StorageError::Malformed { .. }));
}
