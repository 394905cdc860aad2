//! SQLite-backed session slot

use super::{decode_snapshot, SessionStore, StoreError, DEFAULT_SLOT};
use crate::session::Session;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS session_slot (
    slot TEXT PRIMARY KEY,
    snapshot TEXT NOT NULL,
    saved_at TEXT NOT NULL
);
";

/// Session slot stored as a JSON row in a SQLite table
#[derive(Clone)]
pub struct SqliteSessionStore {
    conn: Arc<Mutex<Connection>>,
    slot: String,
}

impl SqliteSessionStore {
    /// Open or create the database at `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the directory or database cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory database (for testing)
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if SQLite cannot be initialized.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            slot: DEFAULT_SLOT.to_string(),
        })
    }

    /// Use a different slot key in the same database
    #[must_use]
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn read_raw(&self) -> Result<Option<String>, StoreError> {
        let conn = self.conn()?;
        let raw = conn
            .query_row(
                "SELECT snapshot FROM session_slot WHERE slot = ?1",
                params![self.slot],
                |row| row.get(0),
            )
            .optional()?;
        Ok(raw)
    }

    /// Overwrite the slot with arbitrary text (for testing corrupt snapshots)
    #[cfg(test)]
    fn put_raw(&self, raw: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO session_slot (slot, snapshot, saved_at) VALUES (?1, ?2, ?3)",
            params![self.slot, raw, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let json = session.to_json()?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO session_slot (slot, snapshot, saved_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(slot) DO UPDATE SET snapshot = excluded.snapshot, saved_at = excluded.saved_at",
            params![self.slot, json, Utc::now().to_rfc3339()],
        )?;
        tracing::debug!(
            slot = %self.slot,
            session_id = %session.session_id(),
            current_question = session.current_index(),
            "Session snapshot saved"
        );
        Ok(())
    }

    async fn load(&self) -> Option<Session> {
        match self.read_raw() {
            Ok(raw) => decode_snapshot(&raw?),
            Err(e) => {
                tracing::warn!(slot = %self.slot, error = %e, "Failed to read session slot");
                None
            }
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM session_slot WHERE slot = ?1", params![self.slot])?;
        Ok(())
    }
}
