//! Domain model for overlaid career collections.
//!
//! # Responsibility
//! - Define records, collection identities and the bundled baseline dataset.
//! - Keep the per-collection field table next to the record shape.
//!
//! # Invariants
//! - Every visible record is identified by a collection-scoped id.
//! - Baseline records are immutable; local changes live in the overlay.

pub mod baseline;
pub mod collection;
pub mod record;
pub mod schema;
