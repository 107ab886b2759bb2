//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate overlay storage and merging into collection-level APIs.
//! - Gate mutating access behind the admin session.
//! - Keep callers decoupled from storage details.

pub mod admin_service;
pub mod career_service;
pub mod collection_service;
pub mod drag_reorder;
