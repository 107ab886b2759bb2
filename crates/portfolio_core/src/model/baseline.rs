//! Bundled baseline dataset.
//!
//! # Responsibility
//! - Load the immutable seed records of every collection once at startup.
//! - Assign stable `{prefix}-{index}` ids from array position.
//!
//! # Invariants
//! - The dataset is never mutated after construction.
//! - Missing collections are empty; unknown collections are ignored.

use crate::model::collection::CollectionKind;
use crate::model::record::{Fields, Record};
use log::{info, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Errors raised while loading the baseline document.
#[derive(Debug)]
pub enum BaselineError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Document root is not a JSON object.
    InvalidDocument(String),
    /// A collection value is not an array.
    NotAnArray(CollectionKind),
    /// An entry of a collection array is not a JSON object.
    InvalidEntry {
        collection: CollectionKind,
        index: usize,
    },
}

impl Display for BaselineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read baseline document: {err}"),
            Self::Json(err) => write!(f, "invalid baseline JSON: {err}"),
            Self::InvalidDocument(details) => write!(f, "invalid baseline document: {details}"),
            Self::NotAnArray(collection) => {
                write!(f, "baseline collection `{collection}` must be an array")
            }
            Self::InvalidEntry { collection, index } => write!(
                f,
                "baseline entry {index} of `{collection}` must be an object"
            ),
        }
    }
}

impl Error for BaselineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BaselineError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for BaselineError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Immutable seed records for all collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaselineDataset {
    collections: BTreeMap<CollectionKind, Vec<Record>>,
}

impl BaselineDataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document shaped `{ "<collection>": [ {..}, .. ], .. }`.
    pub fn from_json_str(document: &str) -> Result<Self, BaselineError> {
        let root: Value = serde_json::from_str(document)?;
        let Value::Object(entries) = root else {
            return Err(BaselineError::InvalidDocument(
                "root must be an object keyed by collection name".to_string(),
            ));
        };

        let mut dataset = Self::new();
        for (name, value) in entries {
            let Ok(kind) = CollectionKind::parse(&name) else {
                warn!("event=baseline_load module=baseline status=ignored collection={name}");
                continue;
            };
            let Value::Array(items) = value else {
                return Err(BaselineError::NotAnArray(kind));
            };

            let mut seeds = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match item {
                    Value::Object(fields) => seeds.push(fields),
                    _ => {
                        return Err(BaselineError::InvalidEntry {
                            collection: kind,
                            index,
                        })
                    }
                }
            }
            dataset = dataset.with_seeds(kind, seeds);
        }

        info!(
            "event=baseline_load module=baseline status=ok collections={} records={}",
            dataset.collections.len(),
            dataset.total_records()
        );
        Ok(dataset)
    }

    /// Reads and parses a baseline document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BaselineError> {
        let document = std::fs::read_to_string(path)?;
        Self::from_json_str(&document)
    }

    /// Replaces the seeds of one collection, assigning ids by position.
    pub fn with_seeds(mut self, kind: CollectionKind, seeds: Vec<Fields>) -> Self {
        let records = seeds
            .into_iter()
            .enumerate()
            .map(|(index, fields)| Record::baseline(kind.id_prefix(), index, fields))
            .collect();
        self.collections.insert(kind, records);
        self
    }

    /// Seed records of one collection, in bundled order.
    pub fn records(&self, kind: CollectionKind) -> &[Record] {
        self.collections.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_records(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{BaselineDataset, BaselineError};
    use crate::model::collection::CollectionKind;
    use serde_json::json;

    #[test]
    fn assigns_positional_ids_per_collection() {
        let document = json!({
            "positions": [{"company": "A"}, {"company": "B"}],
            "skills": [{"name": "Rust", "category": "technical"}]
        })
        .to_string();

        let dataset = BaselineDataset::from_json_str(&document).unwrap();
        let ids: Vec<&str> = dataset
            .records(CollectionKind::Positions)
            .iter()
            .map(|record| record.id.as_str())
            .collect();
        assert_eq!(ids, vec!["positions-0", "positions-1"]);
        assert_eq!(dataset.records(CollectionKind::Skills)[0].id, "skills-0");
        assert!(dataset.records(CollectionKind::Awards).is_empty());
    }

    #[test]
    fn unknown_collections_are_ignored() {
        let document = json!({"projects": [{"title": "x"}], "awards": []}).to_string();
        let dataset = BaselineDataset::from_json_str(&document).unwrap();
        assert_eq!(dataset.total_records(), 0);
    }

    #[test]
    fn non_object_entries_are_rejected() {
        let document = json!({"education": [{"school": "S"}, "oops"]}).to_string();
        let err = BaselineDataset::from_json_str(&document).unwrap_err();
        assert!(matches!(
            err,
            BaselineError::InvalidEntry {
                collection: CollectionKind::Education,
                index: 1
            }
        ));
    }
}
