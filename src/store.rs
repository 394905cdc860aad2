//! Single-slot session persistence
//!
//! The slot holds a serialized snapshot of at most one active session. Every
//! read and write round-trips through JSON, so nothing in memory aliases the
//! stored copy. A snapshot that fails to parse or breaks the session
//! invariants reads back as absent.

mod sqlite;

pub use sqlite::SqliteSessionStore;

use crate::session::Session;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Slot key the active interview is stored under
pub const DEFAULT_SLOT: &str = "currentInterview";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to prepare storage location: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session store lock poisoned")]
    Poisoned,
}

/// Durable single-slot store for the active session
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Overwrite the slot with `session`
    async fn save(&self, session: &Session) -> Result<(), StoreError>;

    /// Last saved snapshot, or `None` if the slot is empty or unreadable
    async fn load(&self) -> Option<Session>;

    /// Empty the slot. Clearing an empty slot succeeds.
    async fn clear(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        (**self).save(session).await
    }

    async fn load(&self) -> Option<Session> {
        (**self).load().await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        (**self).clear().await
    }
}

/// Decode a raw slot value, logging and discarding anything unusable
pub(crate) fn decode_snapshot(raw: &str) -> Option<Session> {
    match Session::from_json(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable session snapshot");
            None
        }
    }
}

/// In-memory slot holding the serialized JSON. Does not survive a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw slot contents, as they would be found on disk
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// Overwrite the slot with arbitrary text (e.g. a corrupt snapshot)
    pub fn put_raw(&self, raw: impl Into<String>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(raw.into());
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        let json = session.to_json()?;
        *self.slot.lock().map_err(|_| StoreError::Poisoned)? = Some(json);
        Ok(())
    }

    async fn load(&self) -> Option<Session> {
        let raw = self.raw()?;
        decode_snapshot(&raw)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().map_err(|_| StoreError::Poisoned)? = None;
        Ok(())
    }
}
