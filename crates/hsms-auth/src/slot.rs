// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session slot backends: process memory and a SQLite key-value table.

use std::path::Path;
use std::sync::Arc;

use dashmap::DashMap;
use hsms_config::model::{SessionConfig, SlotBackend};
use hsms_core::{HsmsError, SessionSlot};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

/// In-memory slot.
///
/// Clones share the same entries, which lets tests model a process restart
/// by handing a clone to a second session store.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    entries: Arc<DashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionSlot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>, HsmsError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), HsmsError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), HsmsError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Slot backed by a `session_slot` table in a SQLite database file.
pub struct SqliteSlot {
    conn: Connection,
}

impl std::fmt::Debug for SqliteSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteSlot")
            .field("path", &self.conn.path())
            .finish()
    }
}

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS session_slot (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
)";

impl SqliteSlot {
    /// Open (creating if needed) the database at `path`.
    ///
    /// Missing parent directories are created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, HsmsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(HsmsError::storage)?;
        }
        let conn = Connection::open(path).map_err(HsmsError::storage)?;
        debug!(path = %path.display(), "opened sqlite session slot");
        Self::with_connection(conn)
    }

    /// A slot over a private in-memory database.
    pub fn open_in_memory() -> Result<Self, HsmsError> {
        Self::with_connection(Connection::open_in_memory().map_err(HsmsError::storage)?)
    }

    fn with_connection(conn: Connection) -> Result<Self, HsmsError> {
        conn.execute_batch(CREATE_TABLE)
            .map_err(HsmsError::storage)?;
        Ok(Self { conn })
    }
}

impl SessionSlot for SqliteSlot {
    fn get(&self, key: &str) -> Result<Option<String>, HsmsError> {
        self.conn
            .query_row(
                "SELECT value FROM session_slot WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(HsmsError::storage)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), HsmsError> {
        self.conn
            .execute(
                "INSERT INTO session_slot (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map(|_| ())
            .map_err(HsmsError::storage)
    }

    fn delete(&self, key: &str) -> Result<(), HsmsError> {
        self.conn
            .execute("DELETE FROM session_slot WHERE key = ?1", params![key])
            .map(|_| ())
            .map_err(HsmsError::storage)
    }
}

/// Open the slot backend selected by the `[session]` configuration section.
pub fn open_slot(config: &SessionConfig) -> Result<Box<dyn SessionSlot>, HsmsError> {
    match config.backend {
        SlotBackend::Sqlite => Ok(Box::new(SqliteSlot::open(&config.database_path)?)),
        SlotBackend::Memory => Ok(Box::new(MemorySlot::new())),
    }
}
