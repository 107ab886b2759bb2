//! Baseline + overlay merge.
//!
//! # Invariants
//! - Output is a pure function of the inputs; inputs are never mutated.
//! - Each id appears at most once in the output.
//! - Runs in O(n) over baseline, additions and order entries.

use crate::model::record::Record;
use crate::overlay::Overlay;
use std::collections::{HashMap, HashSet};

/// Computes the visible, ordered records of one collection.
///
/// Steps:
/// 1. Baseline records in the deletion set are dropped.
/// 2. Remaining baseline records get their edit (if any) shallow-merged.
/// 3. Added records are appended, also edit-merged.
/// 4. With a non-empty order list, listed ids come first in listed order
///    (unknown, deleted and repeated ids skipped); every record the order list
///    does not mention follows in its step 1-3 position.
///
/// Edits and order entries naming absent ids have no effect.
pub fn merge(baseline: &[Record], overlay: &Overlay) -> Vec<Record> {
    let mut merged: Vec<Record> = Vec::with_capacity(baseline.len() + overlay.added.len());

    for record in baseline {
        if overlay.deleted.contains(&record.id) {
            continue;
        }
        merged.push(with_edit(record, overlay));
    }
    for record in &overlay.added {
        merged.push(with_edit(record, overlay));
    }

    dedup_by_id(&mut merged);

    if overlay.order.is_empty() {
        return merged;
    }

    let index: HashMap<&str, usize> = merged
        .iter()
        .enumerate()
        .map(|(position, record)| (record.id.as_str(), position))
        .collect();

    let mut taken = vec![false; merged.len()];
    let mut ordered_positions = Vec::with_capacity(merged.len());
    for id in &overlay.order {
        if let Some(&position) = index.get(id.as_str()) {
            if !taken[position] {
                taken[position] = true;
                ordered_positions.push(position);
            }
        }
    }
    ordered_positions.extend((0..merged.len()).filter(|position| !taken[*position]));

    let mut slots: Vec<Option<Record>> = merged.into_iter().map(Some).collect();
    ordered_positions
        .into_iter()
        .filter_map(|position| slots[position].take())
        .collect()
}

fn with_edit(record: &Record, overlay: &Overlay) -> Record {
    match overlay.edits.get(&record.id) {
        Some(patch) => record.patched(patch),
        None => record.clone(),
    }
}

// A hand-edited store may repeat an added id; first occurrence wins.
fn dedup_by_id(records: &mut Vec<Record>) {
    let mut seen = HashSet::with_capacity(records.len());
    records.retain(|record| seen.insert(record.id.clone()));
}
