use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{Actor, Session};

pub const SESSION_COOKIE: &str = "session_id";

/// Issues, checks and revokes admin session tokens.
///
/// There is one admin identity guarded by a shared plaintext password.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn Store>,
    admin_password: String,
    ttl: Duration,
}

impl SessionService {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, admin_password: impl Into<String>, ttl: Duration) -> Self {
        Self {
            store,
            admin_password: admin_password.into(),
            ttl,
        }
    }

    pub fn authenticate(&self, password: &str) -> Result<Session> {
        self.authenticate_at(password, Utc::now())
    }

    /// Starts a session if `password` matches. A wrong password returns
    /// [`Error::Unauthorized`] and writes nothing.
    pub fn authenticate_at(&self, password: &str, now: DateTime<Utc>) -> Result<Session> {
        if password != self.admin_password {
            return Err(Error::Unauthorized);
        }

        let token = Uuid::new_v4().to_string();
        self.store.create_session(&token, now, now + self.ttl)
    }

    pub fn resolve(&self, token: Option<&str>) -> Actor {
        self.resolve_at(token, Utc::now())
    }

    /// Maps a session token to an actor. Missing, unknown and expired tokens
    /// are all anonymous, as is any storage failure during the lookup.
    pub fn resolve_at(&self, token: Option<&str>, now: DateTime<Utc>) -> Actor {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Actor::Anonymous;
        };

        match self.store.get_session(token) {
            Ok(Some(session)) if session.is_active_at(now) => Actor::Admin,
            Ok(_) => Actor::Anonymous,
            Err(e) => {
                tracing::error!("Failed to look up session: {e}");
                Actor::Anonymous
            }
        }
    }

    /// Deletes the session row for `token`. Returns whether a row existed.
    pub fn revoke(&self, token: &str) -> Result<bool> {
        self.store.delete_session(token)
    }

    pub fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        self.store.purge_expired_sessions(now)
    }
}

/// Periodically deletes expired session rows. Expired rows are already
/// ignored by [`SessionService::resolve`]; this only keeps the table small.
/// Returns `None` when `every` is zero.
pub fn spawn_expiry_sweep(
    sessions: SessionService,
    every: std::time::Duration,
) -> Option<JoinHandle<()>> {
    if every.is_zero() {
        return None;
    }

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            match sessions.purge_expired(Utc::now()) {
                Ok(0) => {}
                Ok(n) => tracing::info!("Purged {n} expired sessions"),
                Err(e) => tracing::error!("Failed to purge expired sessions: {e}"),
            }
        }
    }))
}
