//! Overlay persistence over a key-value store.
//!
//! # Responsibility
//! - Load and save the four overlay structures of a collection as JSON.
//! - Absorb storage and decoding failures at this boundary.
//!
//! # Invariants
//! - Loads never fail: absent, unreadable or malformed values yield the
//!   structure's empty default.
//! - Saves never fail: write errors are logged and reported as `false`.
//! - Each structure is written under its own key; there is no cross-key
//!   transaction.

use crate::model::collection::OverlayKeys;
use crate::overlay::{AdditionList, DeletionSet, EditOverlay, Overlay, OrderList};
use crate::repo::kv_store::KeyValueStore;
use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Overlay storage for one collection.
pub struct OverlayStore<'s, S: KeyValueStore + ?Sized> {
    store: &'s S,
    collection: String,
    keys: OverlayKeys,
}

impl<'s, S: KeyValueStore + ?Sized> OverlayStore<'s, S> {
    pub fn new(store: &'s S, collection: impl Into<String>) -> Self {
        let collection = collection.into();
        let keys = OverlayKeys::for_collection(&collection);
        Self {
            store,
            collection,
            keys,
        }
    }

    pub fn keys(&self) -> &OverlayKeys {
        &self.keys
    }

    /// Loads all four structures.
    pub fn load_overlay(&self) -> Overlay {
        Overlay {
            edits: self.load::<EditOverlay>(&self.keys.edits),
            deleted: self.load::<DeletionSet>(&self.keys.deleted),
            added: self.load::<AdditionList>(&self.keys.added),
            order: self.load::<OrderList>(&self.keys.order),
        }
    }

    pub fn save_edits(&self, edits: &EditOverlay) -> bool {
        self.save(&self.keys.edits, edits)
    }

    pub fn save_deleted(&self, deleted: &DeletionSet) -> bool {
        self.save(&self.keys.deleted, deleted)
    }

    pub fn save_added(&self, added: &AdditionList) -> bool {
        self.save(&self.keys.added, added)
    }

    pub fn save_order(&self, order: &OrderList) -> bool {
        self.save(&self.keys.order, order)
    }

    /// Loads one JSON value, degrading to `T::default()` on any failure.
    pub fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.store.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(err) => {
                error!(
                    "event=overlay_load module=overlay status=error collection={} key={} error={}",
                    self.collection, key, err
                );
                return T::default();
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=overlay_load module=overlay status=degraded collection={} key={} bytes={} error={}",
                    self.collection,
                    key,
                    raw.len(),
                    err
                );
                T::default()
            }
        }
    }

    /// Saves one JSON value; returns whether it reached the store.
    pub fn save<T>(&self, key: &str, value: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                error!(
                    "event=overlay_save module=overlay status=error collection={} key={} error_code=encode_failed error={}",
                    self.collection, key, err
                );
                return false;
            }
        };

        match self.store.set_item(key, &raw) {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=overlay_save module=overlay status=error collection={} key={} bytes={} error_code=write_failed error={}",
                    self.collection,
                    key,
                    raw.len(),
                    err
                );
                false
            }
        }
    }
}
