//! Career store: one controller per collection.
//!
//! # Responsibility
//! - Construct every collection controller once, over one shared store.
//! - Export the merged view for seeding the remote-database backend.
//!
//! # Invariants
//! - Controllers share no state besides the underlying key-value store.
//! - Mutable access through `collection_for_admin` requires an admin session.

use crate::clock::Clock;
use crate::model::baseline::BaselineDataset;
use crate::model::collection::CollectionKind;
use crate::model::record::ID_FIELD;
use crate::repo::kv_store::KeyValueStore;
use crate::service::admin_service::{AccessDenied, AccessGate};
use crate::service::collection_service::CollectionController;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Field carrying the display position in exported snapshots.
pub const ORDER_FIELD: &str = "order";

/// All career collections of the site.
pub struct CareerStore<'s, S: KeyValueStore + ?Sized> {
    controllers: Vec<CollectionController<'s, S>>,
    sections: BTreeMap<CollectionKind, bool>,
}

impl<'s, S: KeyValueStore + ?Sized> CareerStore<'s, S> {
    /// Builds every controller from the baseline and persisted overlays.
    pub fn new(store: &'s S, baseline: &BaselineDataset, clock: Arc<dyn Clock>) -> Self {
        let controllers = CollectionKind::ALL
            .into_iter()
            .map(|kind| {
                CollectionController::new(
                    store,
                    kind.name(),
                    baseline.records(kind).to_vec(),
                    Arc::clone(&clock),
                )
            })
            .collect();
        Self {
            controllers,
            sections: BTreeMap::new(),
        }
    }

    /// Applies per-collection visibility flags.
    pub fn with_sections(mut self, sections: BTreeMap<CollectionKind, bool>) -> Self {
        self.sections = sections;
        self
    }

    pub fn collection(&self, kind: CollectionKind) -> &CollectionController<'s, S> {
        &self.controllers[kind.index()]
    }

    pub fn collection_mut(&mut self, kind: CollectionKind) -> &mut CollectionController<'s, S> {
        &mut self.controllers[kind.index()]
    }

    /// Mutable access gated on an active admin session.
    pub fn collection_for_admin<G: KeyValueStore + ?Sized>(
        &mut self,
        kind: CollectionKind,
        gate: &AccessGate<'_, G>,
    ) -> Result<&mut CollectionController<'s, S>, AccessDenied> {
        gate.require_admin()?;
        Ok(self.collection_mut(kind))
    }

    pub fn is_section_visible(&self, kind: CollectionKind) -> bool {
        self.sections.get(&kind).copied().unwrap_or(true)
    }

    /// Merged records of every collection as one JSON object.
    ///
    /// Each record carries its id under `_id` and its display position under
    /// `order`.
    pub fn export_snapshot(&self) -> Value {
        let mut snapshot = Map::new();
        for kind in CollectionKind::ALL {
            let items = self
                .collection(kind)
                .items()
                .iter()
                .enumerate()
                .map(|(position, record)| {
                    let mut entry = record.fields.clone();
                    entry.insert(ID_FIELD.to_string(), Value::String(record.id.clone()));
                    entry.insert(ORDER_FIELD.to_string(), Value::from(position));
                    Value::Object(entry)
                })
                .collect();
            snapshot.insert(kind.name().to_string(), Value::Array(items));
        }
        Value::Object(snapshot)
    }
}
