//! Named career collections.
//!
//! # Responsibility
//! - Enumerate the fixed set of independently overlaid collections.
//! - Derive the storage keys and baseline id prefix for each collection.
//!
//! # Invariants
//! - Collection names are stable; they are part of persisted storage keys.
//! - No collection uses `new` as its id prefix (reserved for added records).

use std::error::Error;
use std::fmt::{Display, Formatter};

/// One independently overlaid group of career records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectionKind {
    Positions,
    Education,
    Certifications,
    Publications,
    Skills,
    Awards,
    AcademicProjects,
    Teaching,
    PartTimeJobs,
    GroupActivities,
    Mentoring,
    ResearchExchange,
    WorkProjects,
}

impl CollectionKind {
    /// Every collection, in display order of the career page.
    pub const ALL: [CollectionKind; 13] = [
        Self::Positions,
        Self::Education,
        Self::Certifications,
        Self::Publications,
        Self::Skills,
        Self::Awards,
        Self::AcademicProjects,
        Self::Teaching,
        Self::PartTimeJobs,
        Self::GroupActivities,
        Self::Mentoring,
        Self::ResearchExchange,
        Self::WorkProjects,
    ];

    /// Stable collection name used in storage keys and baseline documents.
    pub fn name(self) -> &'static str {
        match self {
            Self::Positions => "positions",
            Self::Education => "education",
            Self::Certifications => "certifications",
            Self::Publications => "publications",
            Self::Skills => "skills",
            Self::Awards => "awards",
            Self::AcademicProjects => "academicProjects",
            Self::Teaching => "teaching",
            Self::PartTimeJobs => "partTimeJobs",
            Self::GroupActivities => "groupActivities",
            Self::Mentoring => "mentoring",
            Self::ResearchExchange => "researchExchange",
            Self::WorkProjects => "workProjects",
        }
    }

    /// Prefix of baseline record ids (`{prefix}-{index}`).
    pub fn id_prefix(self) -> &'static str {
        self.name()
    }

    /// Position of this collection inside [`CollectionKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parses a collection from its stable name.
    pub fn parse(value: &str) -> Result<Self, UnknownCollection> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == value.trim())
            .ok_or_else(|| UnknownCollection(value.to_string()))
    }
}

impl Display for CollectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Collection name that does not match any [`CollectionKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCollection(pub String);

impl Display for UnknownCollection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown collection: `{}`", self.0)
    }
}

impl Error for UnknownCollection {}

/// Storage keys of the four overlay structures of one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayKeys {
    pub edits: String,
    pub deleted: String,
    pub order: String,
    pub added: String,
}

impl OverlayKeys {
    /// Builds `career_{name}_{structure}` keys for a collection name.
    pub fn for_collection(name: &str) -> Self {
        Self {
            edits: format!("career_{name}_edits"),
            deleted: format!("career_{name}_deleted"),
            order: format!("career_{name}_order"),
            added: format!("career_{name}_added"),
        }
    }
}
