//! Runtime configuration.
//!
//! # Responsibility
//! - Deserialize the portfolio configuration document.
//! - Reject configurations that would leave the admin gate unusable.
//!
//! # Invariants
//! - A loaded config always has a non-blank credential and a positive ttl.
//! - Section flags only name known collections.

use crate::logging::default_log_level;
use crate::model::collection::{CollectionKind, UnknownCollection};
use crate::service::admin_service::DEFAULT_SESSION_TTL;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Configuration loading errors.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// `admin_password` is blank.
    EmptyCredential,
    /// `session_ttl_days` is zero.
    ZeroSessionTtl,
    /// `sections` names a collection that does not exist.
    UnknownSection(UnknownCollection),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Json(err) => write!(f, "invalid config JSON: {err}"),
            Self::EmptyCredential => write!(f, "admin_password must not be blank"),
            Self::ZeroSessionTtl => write!(f, "session_ttl_days must be at least 1"),
            Self::UnknownSection(err) => write!(f, "invalid sections entry: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::UnknownSection(err) => Some(err),
            Self::EmptyCredential | Self::ZeroSessionTtl => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    admin_password: String,
    #[serde(default = "default_session_ttl_days")]
    session_ttl_days: u64,
    #[serde(default)]
    log_level: Option<String>,
    #[serde(default)]
    log_dir: Option<PathBuf>,
    #[serde(default)]
    db_path: Option<PathBuf>,
    #[serde(default)]
    sections: BTreeMap<String, bool>,
}

fn default_session_ttl_days() -> u64 {
    DEFAULT_SESSION_TTL.as_secs() / SECONDS_PER_DAY
}

/// Validated portfolio configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioConfig {
    /// Fixed credential checked by the admin gate.
    pub admin_password: String,
    pub session_ttl: Duration,
    pub log_level: String,
    /// Absolute directory for rolling logs; logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
    /// SQLite file backing the key-value store; in-memory when `None`.
    pub db_path: Option<PathBuf>,
    /// Per-collection visibility; collections not listed are visible.
    pub sections: BTreeMap<CollectionKind, bool>,
}

impl PortfolioConfig {
    /// Builds a config with defaults for everything but the credential.
    pub fn with_password(admin_password: impl Into<String>) -> Result<Self, ConfigError> {
        Self::from_raw(RawConfig {
            admin_password: admin_password.into(),
            session_ttl_days: default_session_ttl_days(),
            log_level: None,
            log_dir: None,
            db_path: None,
            sections: BTreeMap::new(),
        })
    }

    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(document)?;
        Self::from_raw(raw)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let document = std::fs::read_to_string(path)?;
        Self::from_json_str(&document)
    }

    /// Whether a collection's section is enabled.
    pub fn is_section_visible(&self, kind: CollectionKind) -> bool {
        self.sections.get(&kind).copied().unwrap_or(true)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        if raw.admin_password.trim().is_empty() {
            return Err(ConfigError::EmptyCredential);
        }
        if raw.session_ttl_days == 0 {
            return Err(ConfigError::ZeroSessionTtl);
        }

        let mut sections = BTreeMap::new();
        for (name, visible) in raw.sections {
            let kind = CollectionKind::parse(&name).map_err(ConfigError::UnknownSection)?;
            sections.insert(kind, visible);
        }

        Ok(Self {
            admin_password: raw.admin_password,
            session_ttl: Duration::from_secs(raw.session_ttl_days.saturating_mul(SECONDS_PER_DAY)),
            log_level: raw
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: raw.log_dir,
            db_path: raw.db_path,
            sections,
        })
    }
}
