//! Drag-and-drop to reorder translation.
//!
//! # Responsibility
//! - Turn a drag-end gesture (dragged id, drop target id) into exactly one
//!   single-item reorder call.
//!
//! # Invariants
//! - Unresolvable ids, a missing drop target, or a drop onto itself are
//!   no-ops.

use crate::model::record::RecordId;

/// Anything whose visible items can be relocated one at a time.
pub trait ReorderTarget {
    /// Display position of a visible id.
    fn position_of(&self, id: &str) -> Option<usize>;
    /// Visible ids in display order.
    fn item_ids(&self) -> Vec<RecordId>;
    /// Moves the item at `old_index` to `new_index`.
    fn reorder(&mut self, old_index: usize, new_index: usize);
}

/// End of a drag gesture as reported by the sortable container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd<'a> {
    /// Id of the dragged item.
    pub active_id: &'a str,
    /// Id of the item it was dropped over, if any.
    pub over_id: Option<&'a str>,
}

/// Adapter between drag gestures and a [`ReorderTarget`].
pub struct DragReorderAdapter<'t, T: ReorderTarget + ?Sized> {
    target: &'t mut T,
}

impl<'t, T: ReorderTarget + ?Sized> DragReorderAdapter<'t, T> {
    pub fn new(target: &'t mut T) -> Self {
        Self { target }
    }

    /// Ids for the sortable container, in display order.
    pub fn item_ids(&self) -> Vec<RecordId> {
        self.target.item_ids()
    }

    /// Applies a drag-end gesture; returns whether a reorder happened.
    pub fn handle_drag_end(&mut self, event: DragEnd<'_>) -> bool {
        let Some(over_id) = event.over_id else {
            return false;
        };
        if over_id == event.active_id {
            return false;
        }

        let (Some(old_index), Some(new_index)) = (
            self.target.position_of(event.active_id),
            self.target.position_of(over_id),
        ) else {
            return false;
        };
        if old_index == new_index {
            return false;
        }

        self.target.reorder(old_index, new_index);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{DragEnd, DragReorderAdapter, ReorderTarget};
    use crate::model::record::RecordId;

    struct FakeList {
        ids: Vec<RecordId>,
        calls: Vec<(usize, usize)>,
    }

    impl ReorderTarget for FakeList {
        fn position_of(&self, id: &str) -> Option<usize> {
            self.ids.iter().position(|current| current == id)
        }

        fn item_ids(&self) -> Vec<RecordId> {
            self.ids.clone()
        }

        fn reorder(&mut self, old_index: usize, new_index: usize) {
            self.calls.push((old_index, new_index));
        }
    }

    fn fake() -> FakeList {
        FakeList {
            ids: vec!["a".into(), "b".into(), "c".into()],
            calls: Vec::new(),
        }
    }

    #[test]
    fn resolves_both_ids_to_indices() {
        let mut list = fake();
        let moved = DragReorderAdapter::new(&mut list).handle_drag_end(DragEnd {
            active_id: "c",
            over_id: Some("a"),
        });
        assert!(moved);
        assert_eq!(list.calls, vec![(2, 0)]);
    }

    #[test]
    fn ignores_missing_or_self_targets() {
        let mut list = fake();
        let mut adapter = DragReorderAdapter::new(&mut list);
        for event in [
            DragEnd { active_id: "a", over_id: None },
            DragEnd { active_id: "a", over_id: Some("a") },
            DragEnd { active_id: "zz", over_id: Some("a") },
            DragEnd { active_id: "a", over_id: Some("zz") },
        ] {
            assert!(!adapter.handle_drag_end(event));
        }
        assert!(list.calls.is_empty());
    }
}
