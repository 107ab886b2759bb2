use portfolio_core::{
    CollectionController, DragEnd, DragReorderAdapter, Fields, ManualClock, MemoryKvStore, Record,
};
use serde_json::json;
use std::sync::Arc;

fn controller(store: &MemoryKvStore) -> CollectionController<'_, MemoryKvStore> {
    let baseline = ["X", "Y", "Z"]
        .iter()
        .enumerate()
        .map(|(index, title)| {
            let fields: Fields = json!({ "title": title }).as_object().cloned().unwrap();
            Record::baseline("awards", index, fields)
        })
        .collect();
    CollectionController::new(store, "awards", baseline, Arc::new(ManualClock::new(0)))
}

#[test]
fn drop_onto_another_item_moves_the_dragged_item_there() {
    let store = MemoryKvStore::new();
    let mut awards = controller(&store);

    let moved = DragReorderAdapter::new(&mut awards).handle_drag_end(DragEnd {
        active_id: "awards-0",
        over_id: Some("awards-2"),
    });

    assert!(moved);
    assert_eq!(awards.ids(), vec!["awards-1", "awards-2", "awards-0"]);
    assert_eq!(
        controller(&store).ids(),
        vec!["awards-1", "awards-2", "awards-0"]
    );
}

#[test]
fn dragging_upwards_inserts_before_the_target() {
    let store = MemoryKvStore::new();
    let mut awards = controller(&store);

    DragReorderAdapter::new(&mut awards).handle_drag_end(DragEnd {
        active_id: "awards-2",
        over_id: Some("awards-0"),
    });

    assert_eq!(awards.ids(), vec!["awards-2", "awards-0", "awards-1"]);
}

#[test]
fn adapter_exposes_ids_in_display_order() {
    let store = MemoryKvStore::new();
    let mut awards = controller(&store);
    awards.reorder(2, 0);

    let adapter = DragReorderAdapter::new(&mut awards);
    assert_eq!(adapter.item_ids(), vec!["awards-2", "awards-0", "awards-1"]);
}

#[test]
fn cancelled_or_unresolvable_drops_leave_store_untouched() {
    let store = MemoryKvStore::new();
    let mut awards = controller(&store);
    awards.remove("awards-1");
    let keys_before = store.keys();
    let ids_before = awards.ids();

    let mut adapter = DragReorderAdapter::new(&mut awards);
    assert!(!adapter.handle_drag_end(DragEnd {
        active_id: "awards-0",
        over_id: None,
    }));
    assert!(!adapter.handle_drag_end(DragEnd {
        active_id: "awards-0",
        over_id: Some("awards-0"),
    }));
    assert!(!adapter.handle_drag_end(DragEnd {
        active_id: "awards-1",
        over_id: Some("awards-0"),
    }));

    assert_eq!(awards.ids(), ids_before);
    assert_eq!(store.keys(), keys_before);
}
