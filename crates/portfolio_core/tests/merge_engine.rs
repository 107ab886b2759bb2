use portfolio_core::{merge, Fields, Overlay, Record};
use serde_json::json;

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().expect("fixture must be an object")
}

fn baseline() -> Vec<Record> {
    vec![
        Record::baseline("p", 0, fields(json!({"title": "A", "company": "Acme"}))),
        Record::baseline("p", 1, fields(json!({"title": "B", "company": "Beta"}))),
        Record::baseline("p", 2, fields(json!({"title": "C", "company": "Core"}))),
    ]
}

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|record| record.id.as_str()).collect()
}

#[test]
fn deletions_edits_and_additions_apply_in_natural_order() {
    let mut overlay = Overlay::default();
    overlay.deleted.insert("p-1".into());
    overlay
        .edits
        .insert("p-2".into(), fields(json!({"title": "C2"})));
    overlay
        .added
        .push(Record::new("new-5-aaaaaaaaa", fields(json!({"title": "D"}))));

    let merged = merge(&baseline(), &overlay);
    assert_eq!(ids(&merged), vec!["p-0", "p-2", "new-5-aaaaaaaaa"]);
    assert_eq!(merged[1].get("title"), Some(&json!("C2")));
    assert_eq!(merged[1].get("company"), Some(&json!("Core")));
}

#[test]
fn edits_apply_to_added_records_too() {
    let mut overlay = Overlay::default();
    overlay
        .added
        .push(Record::new("new-5-aaaaaaaaa", fields(json!({"title": "D"}))));
    overlay
        .edits
        .insert("new-5-aaaaaaaaa".into(), fields(json!({"title": "D2"})));

    let merged = merge(&baseline(), &overlay);
    assert_eq!(merged[3].get("title"), Some(&json!("D2")));
}

#[test]
fn absent_targets_are_silently_ignored() {
    let mut overlay = Overlay::default();
    overlay
        .edits
        .insert("p-9".into(), fields(json!({"title": "ghost"})));
    overlay.deleted.insert("p-42".into());

    assert_eq!(merge(&baseline(), &overlay), baseline());
}

#[test]
fn order_skips_deleted_ids_and_appends_unlisted_records() {
    let mut overlay = Overlay::default();
    overlay.deleted.insert("p-0".into());
    overlay
        .added
        .push(Record::new("new-5-aaaaaaaaa", fields(json!({"title": "D"}))));
    overlay.order = vec!["p-2".into(), "p-0".into()];

    assert_eq!(
        ids(&merge(&baseline(), &overlay)),
        vec!["p-2", "p-1", "new-5-aaaaaaaaa"]
    );
}

#[test]
fn merge_is_deterministic_and_leaves_inputs_untouched() {
    let base = baseline();
    let mut overlay = Overlay::default();
    overlay
        .edits
        .insert("p-0".into(), fields(json!({"title": "X"})));
    overlay.order = vec!["p-1".into(), "p-0".into()];
    let overlay_before = overlay.clone();

    let first = merge(&base, &overlay);
    let second = merge(&base, &overlay);

    assert_eq!(first, second);
    assert_eq!(base, baseline());
    assert_eq!(overlay, overlay_before);
}

#[test]
fn edits_never_change_identity() {
    let mut overlay = Overlay::default();
    overlay
        .edits
        .insert("p-0".into(), fields(json!({"_id": "p-1", "title": "X"})));

    let merged = merge(&baseline(), &overlay);
    assert_eq!(ids(&merged), vec!["p-0", "p-1", "p-2"]);
    assert_eq!(merged[0].get("title"), Some(&json!("X")));
}
