//! Local overlay persistence core for the portfolio site.
//!
//! Bundled career collections are immutable; local edits, deletions,
//! additions and custom ordering are persisted as an overlay in a synchronous
//! key-value store and merged over the baseline on every change.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod repo;
pub mod service;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, PortfolioConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::baseline::{BaselineDataset, BaselineError};
pub use model::collection::{CollectionKind, OverlayKeys, UnknownCollection};
pub use model::record::{Fields, Record, RecordId, RecordOrigin, ADDED_ID_PREFIX, ID_FIELD};
pub use model::schema::{
    field_configs, validate_patch, validate_record, FieldConfig, FieldType,
    RecordValidationError,
};
pub use overlay::{merge, Overlay};
pub use repo::kv_store::{KeyValueStore, MemoryKvStore, StoreError, StoreResult};
pub use repo::overlay_repo::OverlayStore;
pub use repo::sqlite_kv::SqliteKvStore;
pub use service::admin_service::{
    AccessDenied, AccessGate, AdminSession, ADMIN_FLAG_KEY, ADMIN_TIME_KEY, DEFAULT_SESSION_TTL,
};
pub use service::career_service::{CareerStore, ORDER_FIELD};
pub use service::collection_service::CollectionController;
pub use service::drag_reorder::{DragEnd, DragReorderAdapter, ReorderTarget};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
