use portfolio_core::{
    Fields, KeyValueStore, MemoryKvStore, Overlay, OverlayStore, Record, StoreError,
    StoreResult,
};
use serde_json::json;

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().expect("fixture must be an object")
}

/// Store whose reads always fail, as an unavailable backend would.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::QuotaExceeded {
            key: key.to_string(),
            quota_bytes: 0,
        })
    }

    fn set_item(&self, key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::QuotaExceeded {
            key: key.to_string(),
            quota_bytes: 0,
        })
    }

    fn remove_item(&self, _key: &str) -> StoreResult<()> {
        Ok(())
    }
}

#[test]
fn missing_keys_load_as_empty_overlay() {
    let store = MemoryKvStore::new();
    let overlay = OverlayStore::new(&store, "positions").load_overlay();
    assert!(overlay.is_empty());
}

#[test]
fn saved_structures_reload_under_career_keys() {
    let store = MemoryKvStore::new();
    let storage = OverlayStore::new(&store, "positions");

    let mut expected = Overlay::default();
    expected
        .edits
        .insert("positions-0".into(), fields(json!({"title": "Lead"})));
    expected.deleted.insert("positions-1".into());
    expected
        .added
        .push(Record::new("new-1-abcdefghi", fields(json!({"title": "New"}))));
    expected.order = vec!["new-1-abcdefghi".into(), "positions-0".into()];

    assert!(storage.save_edits(&expected.edits));
    assert!(storage.save_deleted(&expected.deleted));
    assert!(storage.save_added(&expected.added));
    assert!(storage.save_order(&expected.order));

    assert_eq!(
        store.keys(),
        vec![
            "career_positions_added",
            "career_positions_deleted",
            "career_positions_edits",
            "career_positions_order",
        ]
    );
    assert_eq!(
        store.get_item("career_positions_deleted").unwrap().as_deref(),
        Some(r#"["positions-1"]"#)
    );
    assert_eq!(OverlayStore::new(&store, "positions").load_overlay(), expected);
}

#[test]
fn malformed_json_degrades_only_the_affected_structure() {
    let store = MemoryKvStore::new();
    store.set_item("career_awards_edits", "{not json").unwrap();
    store.set_item("career_awards_deleted", r#"{"oops": true}"#).unwrap();
    store.set_item("career_awards_order", r#"["awards-1","awards-0"]"#).unwrap();

    let overlay = OverlayStore::new(&store, "awards").load_overlay();
    assert!(overlay.edits.is_empty());
    assert!(overlay.deleted.is_empty());
    assert_eq!(overlay.order, vec!["awards-1", "awards-0"]);
}

#[test]
fn added_entries_without_identity_degrade_to_empty() {
    let store = MemoryKvStore::new();
    store
        .set_item("career_skills_added", r#"[{"name": "Rust"}]"#)
        .unwrap();

    let overlay = OverlayStore::new(&store, "skills").load_overlay();
    assert!(overlay.added.is_empty());
}

#[test]
fn read_and_write_failures_are_absorbed() {
    let store = BrokenStore;
    let storage = OverlayStore::new(&store, "teaching");

    assert!(storage.load_overlay().is_empty());
    assert!(!storage.save_order(&vec!["teaching-0".to_string()]));
}
