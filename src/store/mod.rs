mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
///
/// Implementations must serialize writes: the backing database accepts a
/// single writer at a time.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Link operations
    fn create_link(&self, short_id: &str, long_url: &str, created_at: DateTime<Utc>)
    -> Result<Link>;
    fn get_link_by_short_id(&self, short_id: &str) -> Result<Option<Link>>;
    fn list_links(&self) -> Result<Vec<Link>>;
    fn delete_link(&self, id: i64) -> Result<bool>;

    // Session operations
    fn create_session(
        &self,
        session_id: &str,
        created_at: DateTime<Utc>,
        expiry_time: DateTime<Utc>,
    ) -> Result<Session>;
    fn get_session(&self, session_id: &str) -> Result<Option<Session>>;
    fn delete_session(&self, session_id: &str) -> Result<bool>;
    fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize>;
}
