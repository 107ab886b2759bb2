//! Persistence layer: key-value stores and overlay storage.
//!
//! # Responsibility
//! - Define the synchronous key-value contract the engine persists into.
//! - Isolate SQLite and JSON encoding details from the service layer.
//!
//! # Invariants
//! - Overlay storage absorbs every store failure; services never see one.

pub mod kv_store;
pub mod overlay_repo;
pub mod sqlite_kv;
