//! Local overlay structures layered over baseline records.
//!
//! # Responsibility
//! - Hold the four independently persisted structures of one collection.
//! - Compute the visible record list from baseline + overlay (`merge`).
//!
//! # Invariants
//! - The overlay never references baseline storage; it only names ids.
//! - Each structure is persisted under its own key and replaced wholesale.

use crate::model::record::{Fields, Record, RecordId};
use std::collections::{BTreeMap, BTreeSet};

pub mod merge;

pub use merge::merge;

/// Partial field overrides keyed by record id.
pub type EditOverlay = BTreeMap<RecordId, Fields>;

/// Ids of baseline records removed from view.
pub type DeletionSet = BTreeSet<RecordId>;

/// Locally added records, in insertion order.
pub type AdditionList = Vec<Record>;

/// Display order by id.
pub type OrderList = Vec<RecordId>;

/// Accumulated local mutations of one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    pub edits: EditOverlay,
    pub deleted: DeletionSet,
    pub added: AdditionList,
    pub order: OrderList,
}

impl Overlay {
    /// Returns whether no local mutation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
            && self.deleted.is_empty()
            && self.added.is_empty()
            && self.order.is_empty()
    }
}
