use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub short_id: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    #[serde(skip)]
    pub session_id: String,
    pub expiry_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// A session is valid strictly before its expiry time.
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expiry_time
    }
}

/// Who is making a request. There is a single admin identity, so the
/// authentication result carries no user data beyond this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Actor {
    Admin,
    #[default]
    Anonymous,
}

impl Actor {
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Actor::Admin)
    }
}
