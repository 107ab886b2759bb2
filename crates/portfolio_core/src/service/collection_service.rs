//! Per-collection overlay controller.
//!
//! # Responsibility
//! - Expose add/update/remove/reorder over one collection's merged view.
//! - Keep the in-memory overlay, the persisted overlay and `items` in step.
//!
//! # Invariants
//! - Every mutation updates `items` before returning.
//! - Unknown or hidden ids make `update`/`remove` a no-op, never an error.
//! - In-memory state advances even when persistence fails; durability is
//!   best-effort.
//! - Visible ids are pairwise distinct.

use crate::clock::Clock;
use crate::model::record::{generate_added_id, sanitize_patch, Fields, Record, RecordId, RecordOrigin};
use crate::overlay::{merge, Overlay};
use crate::repo::kv_store::KeyValueStore;
use crate::repo::overlay_repo::OverlayStore;
use crate::service::drag_reorder::ReorderTarget;
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Controller for one named collection.
pub struct CollectionController<'s, S: KeyValueStore + ?Sized> {
    name: String,
    baseline: Vec<Record>,
    overlay: Overlay,
    items: Vec<Record>,
    positions: HashMap<RecordId, usize>,
    storage: OverlayStore<'s, S>,
    clock: Arc<dyn Clock>,
}

impl<'s, S: KeyValueStore + ?Sized> CollectionController<'s, S> {
    /// Creates a controller and restores its persisted overlay.
    ///
    /// Corrupt or missing overlay keys degrade to an empty overlay, so the
    /// initial `items` is at worst the baseline.
    pub fn new(
        store: &'s S,
        name: impl Into<String>,
        baseline: Vec<Record>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let name = name.into();
        let storage = OverlayStore::new(store, name.clone());
        let overlay = storage.load_overlay();
        let mut controller = Self {
            name,
            baseline,
            overlay,
            items: Vec::new(),
            positions: HashMap::new(),
            storage,
            clock,
        };
        controller.refresh();
        debug!(
            "event=collection_open module=collection status=ok collection={} items={}",
            controller.name,
            controller.items.len()
        );
        controller
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current merged records in display order.
    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.position_of(id).map(|position| &self.items[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Display position of a visible record.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Visible ids in display order.
    pub fn ids(&self) -> Vec<RecordId> {
        self.items.iter().map(|record| record.id.clone()).collect()
    }

    /// In-memory overlay backing `items`.
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Appends a new record and returns its generated id.
    pub fn add(&mut self, fields: Fields) -> RecordId {
        let id = self.next_added_id();
        self.overlay.added.push(Record::new(id.clone(), fields));
        self.storage.save_added(&self.overlay.added);

        let mut order = self.ids();
        order.push(id.clone());
        self.overlay.order = order;
        self.storage.save_order(&self.overlay.order);

        self.refresh();
        info!(
            "event=record_add module=collection status=ok collection={} id={} items={}",
            self.name,
            id,
            self.items.len()
        );
        id
    }

    /// Applies a partial field patch to a visible record.
    ///
    /// Added records are patched in place; baseline records accumulate the
    /// patch in the edit overlay.
    pub fn update(&mut self, id: &str, partial: Fields) {
        if !self.contains(id) {
            debug!(
                "event=record_update module=collection status=skipped collection={} id={} reason=not_visible",
                self.name, id
            );
            return;
        }
        let partial = sanitize_patch(partial);
        if partial.is_empty() {
            return;
        }

        match RecordOrigin::of(id) {
            RecordOrigin::Added => {
                let Some(record) = self.overlay.added.iter_mut().find(|record| record.id == id)
                else {
                    return;
                };
                record.apply_patch(&partial);
                self.storage.save_added(&self.overlay.added);
            }
            RecordOrigin::Baseline => {
                self.overlay
                    .edits
                    .entry(id.to_string())
                    .or_default()
                    .extend(partial);
                self.storage.save_edits(&self.overlay.edits);
            }
        }

        self.refresh();
        info!(
            "event=record_update module=collection status=ok collection={} id={}",
            self.name, id
        );
    }

    /// Removes a visible record; repeated calls are no-ops.
    pub fn remove(&mut self, id: &str) {
        if !self.contains(id) {
            debug!(
                "event=record_remove module=collection status=skipped collection={} id={} reason=not_visible",
                self.name, id
            );
            return;
        }

        match RecordOrigin::of(id) {
            RecordOrigin::Added => {
                self.overlay.added.retain(|record| record.id != id);
                self.storage.save_added(&self.overlay.added);
            }
            RecordOrigin::Baseline => {
                self.overlay.deleted.insert(id.to_string());
                self.storage.save_deleted(&self.overlay.deleted);
            }
        }

        self.overlay.order = self
            .items
            .iter()
            .filter(|record| record.id != id)
            .map(|record| record.id.clone())
            .collect();
        self.storage.save_order(&self.overlay.order);

        self.refresh();
        info!(
            "event=record_remove module=collection status=ok collection={} id={} items={}",
            self.name,
            id,
            self.items.len()
        );
    }

    /// Moves the record at `old_index` to `new_index`.
    ///
    /// Only one record moves; the rest keep their relative order. An
    /// out-of-range `old_index` is a no-op and `new_index` is clamped to the
    /// last position.
    pub fn reorder(&mut self, old_index: usize, new_index: usize) {
        let len = self.items.len();
        if old_index >= len {
            debug!(
                "event=record_reorder module=collection status=skipped collection={} old_index={} len={}",
                self.name, old_index, len
            );
            return;
        }
        let new_index = new_index.min(len - 1);
        if old_index == new_index {
            return;
        }

        let mut order = self.ids();
        let moved = order.remove(old_index);
        order.insert(new_index, moved);
        self.overlay.order = order;
        self.storage.save_order(&self.overlay.order);

        self.refresh();
        info!(
            "event=record_reorder module=collection status=ok collection={} old_index={} new_index={}",
            self.name, old_index, new_index
        );
    }

    fn refresh(&mut self) {
        self.items = merge(&self.baseline, &self.overlay);
        self.positions = self
            .items
            .iter()
            .enumerate()
            .map(|(position, record)| (record.id.clone(), position))
            .collect();
    }

    fn next_added_id(&self) -> RecordId {
        let taken: HashSet<&str> = self
            .overlay
            .added
            .iter()
            .map(|record| record.id.as_str())
            .collect();
        loop {
            let id = generate_added_id(self.clock.now_ms());
            if !taken.contains(id.as_str()) && !self.contains(&id) {
                return id;
            }
        }
    }
}

impl<S: KeyValueStore + ?Sized> ReorderTarget for CollectionController<'_, S> {
    fn position_of(&self, id: &str) -> Option<usize> {
        CollectionController::position_of(self, id)
    }

    fn item_ids(&self) -> Vec<RecordId> {
        self.ids()
    }

    fn reorder(&mut self, old_index: usize, new_index: usize) {
        CollectionController::reorder(self, old_index, new_index);
    }
}
