//! Admin session gate.
//!
//! # Responsibility
//! - Track whether the single site owner is logged in.
//! - Persist the session so it survives reloads for a bounded time.
//!
//! # Invariants
//! - A session is valid while `now - login_time < ttl`.
//! - Any read that observes an expired session clears the persisted keys.
//! - Storage failures never surface to callers; they are logged.
//! - The credential is never logged.

use crate::clock::{duration_ms, Clock};
use crate::repo::kv_store::KeyValueStore;
use log::{error, info, warn};
use std::cell::Cell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

/// Persisted flag key; holds `"true"` while logged in.
pub const ADMIN_FLAG_KEY: &str = "portfolio_admin";
/// Persisted login time key; epoch milliseconds as a decimal string.
pub const ADMIN_TIME_KEY: &str = "portfolio_admin_time";
/// Default session lifetime.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

const ADMIN_FLAG_VALUE: &str = "true";

/// Admin session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminSession {
    LoggedOut,
    /// Logged in until `expires_at` (epoch ms, exclusive).
    LoggedIn { expires_at: i64 },
}

impl AdminSession {
    pub fn is_logged_in(self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }
}

/// Mutation attempted without an admin session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDenied;

impl Display for AccessDenied {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "admin session required")
    }
}

impl Error for AccessDenied {}

/// Admin session state machine over a key-value store.
pub struct AccessGate<'s, S: KeyValueStore + ?Sized> {
    store: &'s S,
    clock: Arc<dyn Clock>,
    credential: String,
    ttl_ms: i64,
    session: Cell<AdminSession>,
}

impl<'s, S: KeyValueStore + ?Sized> AccessGate<'s, S> {
    /// Creates a gate and restores any persisted, unexpired session.
    pub fn new(
        store: &'s S,
        clock: Arc<dyn Clock>,
        credential: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        let gate = Self {
            store,
            clock,
            credential: credential.into(),
            ttl_ms: duration_ms(ttl),
            session: Cell::new(AdminSession::LoggedOut),
        };
        gate.session.set(gate.restore());
        gate
    }

    /// Current session, expiring it first when its time is up.
    pub fn session(&self) -> AdminSession {
        if let AdminSession::LoggedIn { expires_at } = self.session.get() {
            if self.clock.now_ms() >= expires_at {
                info!("event=admin_session_expired module=admin status=ok source=read");
                self.clear_persisted();
                self.session.set(AdminSession::LoggedOut);
            }
        }
        self.session.get()
    }

    pub fn is_admin(&self) -> bool {
        self.session().is_logged_in()
    }

    /// Returns `Err(AccessDenied)` unless an admin session is active.
    pub fn require_admin(&self) -> Result<(), AccessDenied> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AccessDenied)
        }
    }

    /// Starts a session when `password` matches the configured credential.
    pub fn login(&self, password: &str) -> bool {
        if password != self.credential {
            warn!("event=admin_login module=admin status=rejected");
            return false;
        }

        let now = self.clock.now_ms();
        self.session.set(AdminSession::LoggedIn {
            expires_at: now.saturating_add(self.ttl_ms),
        });
        self.persist_login(now);
        info!("event=admin_login module=admin status=ok ttl_ms={}", self.ttl_ms);
        true
    }

    /// Ends the session immediately.
    pub fn logout(&self) {
        self.clear_persisted();
        self.session.set(AdminSession::LoggedOut);
        info!("event=admin_logout module=admin status=ok");
    }

    fn restore(&self) -> AdminSession {
        let flag = self.read_key(ADMIN_FLAG_KEY);
        let time = self.read_key(ADMIN_TIME_KEY);

        let (Some(flag), Some(time)) = (flag, time) else {
            return AdminSession::LoggedOut;
        };
        if flag != ADMIN_FLAG_VALUE {
            return AdminSession::LoggedOut;
        }

        let Ok(login_time) = time.trim().parse::<i64>() else {
            warn!("event=admin_session_restore module=admin status=degraded reason=invalid_time");
            self.clear_persisted();
            return AdminSession::LoggedOut;
        };

        let expires_at = login_time.saturating_add(self.ttl_ms);
        if self.clock.now_ms() >= expires_at {
            info!("event=admin_session_expired module=admin status=ok source=restore");
            self.clear_persisted();
            return AdminSession::LoggedOut;
        }

        AdminSession::LoggedIn { expires_at }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.store.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                error!(
                    "event=admin_session_restore module=admin status=error key={} error={}",
                    key, err
                );
                None
            }
        }
    }

    fn persist_login(&self, now: i64) {
        for (key, value) in [
            (ADMIN_FLAG_KEY, ADMIN_FLAG_VALUE.to_string()),
            (ADMIN_TIME_KEY, now.to_string()),
        ] {
            if let Err(err) = self.store.set_item(key, &value) {
                error!(
                    "event=admin_login module=admin status=error key={} error_code=write_failed error={}",
                    key, err
                );
            }
        }
    }

    fn clear_persisted(&self) {
        for key in [ADMIN_FLAG_KEY, ADMIN_TIME_KEY] {
            if let Err(err) = self.store.remove_item(key) {
                error!(
                    "event=admin_session_clear module=admin status=error key={} error={}",
                    key, err
                );
            }
        }
    }
}
