use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

/// SQLite-backed store.
///
/// All access goes through one connection behind a mutex. The mutex is the
/// writer lock: it is held for the duration of each statement and released
/// when the guard drops, on every exit path.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        Self::from_connection(conn)
    }

    /// Opens a private in-memory database. Mostly useful for tests.
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        // In-memory databases report "memory" and ignore the request.
        let _mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

/// Fixed-width UTC form so stored timestamps compare correctly as text.
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn link_from_row(row: &Row<'_>) -> rusqlite::Result<Link> {
    Ok(Link {
        id: row.get(0)?,
        short_id: row.get(1)?,
        long_url: row.get(2)?,
        created_at: parse_datetime(&row.get::<_, String>(3)?),
    })
}

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        session_id: row.get(1)?,
        expiry_time: parse_datetime(&row.get::<_, String>(2)?),
        created_at: parse_datetime(&row.get::<_, String>(3)?),
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Link operations

    fn create_link(
        &self,
        short_id: &str,
        long_url: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Link> {
        let created_at = created_at.trunc_subsecs(6);
        let conn = self.conn();
        conn.execute(
            "INSERT INTO links (short_id, long_url, created_at) VALUES (?1, ?2, ?3)",
            params![short_id, long_url, format_datetime(&created_at)],
        )?;

        Ok(Link {
            id: conn.last_insert_rowid(),
            short_id: short_id.to_string(),
            long_url: long_url.to_string(),
            created_at,
        })
    }

    fn get_link_by_short_id(&self, short_id: &str) -> Result<Option<Link>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, short_id, long_url, created_at FROM links WHERE short_id = ?1",
            params![short_id],
            link_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_links(&self) -> Result<Vec<Link>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT id, short_id, long_url, created_at FROM links ORDER BY id")?;

        let rows = stmt.query_map([], link_from_row)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn delete_link(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM links WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Session operations

    fn create_session(
        &self,
        session_id: &str,
        created_at: DateTime<Utc>,
        expiry_time: DateTime<Utc>,
    ) -> Result<Session> {
        let created_at = created_at.trunc_subsecs(6);
        let expiry_time = expiry_time.trunc_subsecs(6);
        let conn = self.conn();
        conn.execute(
            "INSERT INTO sessions (session_id, expiry_time, created_at) VALUES (?1, ?2, ?3)",
            params![
                session_id,
                format_datetime(&expiry_time),
                format_datetime(&created_at),
            ],
        )?;

        Ok(Session {
            id: conn.last_insert_rowid(),
            session_id: session_id.to_string(),
            expiry_time,
            created_at,
        })
    }

    fn get_session(&self, session_id: &str) -> Result<Option<Session>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, session_id, expiry_time, created_at FROM sessions WHERE session_id = ?1",
            params![session_id],
            session_from_row,
        )
        .optional()
        .map_err(Error::from)
    }

    fn delete_session(&self, session_id: &str) -> Result<bool> {
        let rows = self.conn().execute(
            "DELETE FROM sessions WHERE session_id = ?1",
            params![session_id],
        )?;
        Ok(rows > 0)
    }

    fn purge_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize> {
        let rows = self.conn().execute(
            "DELETE FROM sessions WHERE expiry_time <= ?1",
            params![format_datetime(&now)],
        )?;
        Ok(rows)
    }
}
