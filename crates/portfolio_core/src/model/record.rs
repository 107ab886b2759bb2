//! Career record model.
//!
//! # Responsibility
//! - Define the plain field bag shared by every collection.
//! - Encode record origin (baseline vs. locally added) in the id itself.
//!
//! # Invariants
//! - `id` is never part of `fields`; patches cannot rewrite identity.
//! - Baseline ids are `{prefix}-{index}`; added ids are `new-{ms}-{random}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Collection-scoped record identifier.
pub type RecordId = String;

/// Structured field values of one record (or a partial patch of them).
pub type Fields = Map<String, Value>;

/// Serialized key carrying record identity.
///
/// Seed data may carry its own `id` field (work projects do), so identity
/// uses a separate key.
pub const ID_FIELD: &str = "_id";

/// Id prefix reserved for records added through the overlay.
pub const ADDED_ID_PREFIX: &str = "new-";

const RANDOM_SUFFIX_LEN: usize = 9;

/// Where a record came from, derived from its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOrigin {
    /// Bundled seed record; removal is recorded in the deletion set.
    Baseline,
    /// Record added locally; removal drops it from the addition list.
    Added,
}

impl RecordOrigin {
    /// Classifies an id without consulting any collection state.
    pub fn of(id: &str) -> Self {
        if id.starts_with(ADDED_ID_PREFIX) {
            Self::Added
        } else {
            Self::Baseline
        }
    }
}

/// One record of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    /// Creates a record, dropping any identity key smuggled into `fields`.
    pub fn new(id: impl Into<RecordId>, mut fields: Fields) -> Self {
        fields.remove(ID_FIELD);
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Creates the baseline record at `index` of a seed array.
    pub fn baseline(prefix: &str, index: usize, fields: Fields) -> Self {
        Self::new(baseline_id(prefix, index), fields)
    }

    pub fn origin(&self) -> RecordOrigin {
        RecordOrigin::of(&self.id)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Shallow-merges `patch` over the current fields.
    ///
    /// Top-level keys in `patch` replace existing values; nested objects are
    /// replaced, not merged. The identity key is ignored.
    pub fn apply_patch(&mut self, patch: &Fields) {
        for (key, value) in patch {
            if key == ID_FIELD {
                continue;
            }
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// Returns a copy with `patch` applied.
    pub fn patched(&self, patch: &Fields) -> Self {
        let mut record = self.clone();
        record.apply_patch(patch);
        record
    }
}

/// Builds the stable id of a baseline record.
pub fn baseline_id(prefix: &str, index: usize) -> RecordId {
    format!("{prefix}-{index}")
}

/// Generates an id for a locally added record.
///
/// Shape: `new-{now_ms}-{9 lowercase alphanumerics}`.
pub fn generate_added_id(now_ms: i64) -> RecordId {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{ADDED_ID_PREFIX}{now_ms}-{}",
        &random[..RANDOM_SUFFIX_LEN]
    )
}

/// Removes the identity key from a patch so it only carries field overrides.
pub fn sanitize_patch(mut patch: Fields) -> Fields {
    patch.remove(ID_FIELD);
    patch
}

#[cfg(test)]
mod tests {
    use super::{baseline_id, generate_added_id, Fields, Record, RecordOrigin};
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().expect("fixture must be an object")
    }

    #[test]
    fn origin_is_derived_from_id_prefix() {
        assert_eq!(RecordOrigin::of("positions-3"), RecordOrigin::Baseline);
        assert_eq!(RecordOrigin::of("new-1700000000000-abc123def"), RecordOrigin::Added);
        assert_eq!(RecordOrigin::of("newsletter-0"), RecordOrigin::Baseline);
    }

    #[test]
    fn generated_ids_are_added_and_distinct() {
        let first = generate_added_id(1_700_000_000_000);
        let second = generate_added_id(1_700_000_000_000);
        assert!(first.starts_with("new-1700000000000-"));
        assert_eq!(first.len(), "new-1700000000000-".len() + 9);
        assert_eq!(RecordOrigin::of(&first), RecordOrigin::Added);
        assert_ne!(first, second);
    }

    #[test]
    fn new_strips_identity_from_fields() {
        let record = Record::new("p-0", fields(json!({"_id": "forged", "title": "A"})));
        assert_eq!(record.id, "p-0");
        assert!(record.get("_id").is_none());
    }

    #[test]
    fn patch_is_shallow_and_keeps_identity() {
        let mut record = Record::baseline(
            "p",
            0,
            fields(json!({"title": "A", "meta": {"a": 1, "b": 2}})),
        );
        record.apply_patch(&fields(json!({"_id": "p-9", "meta": {"a": 5}})));
        assert_eq!(record.id, baseline_id("p", 0));
        assert_eq!(record.get("title"), Some(&json!("A")));
        assert_eq!(record.get("meta"), Some(&json!({"a": 5})));
    }

    #[test]
    fn serializes_identity_under_underscore_id() {
        let record = Record::new("workProjects-0", fields(json!({"id": 42, "title": "T"})));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"_id": "workProjects-0", "id": 42, "title": "T"}));

        let back: Record = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
