//! SQLite-backed storage slot: one row of the `local_storage` table.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::StorageSlot;
use crate::database::Database;
use crate::types::errors::StorageError;

/// Stores the slot payload as a row keyed by the slot name.
pub struct SqliteSlot {
    db: Database,
    key: String,
}

impl SqliteSlot {
    pub fn new(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    /// The database holding this slot's row.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl StorageSlot for SqliteSlot {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        self.db
            .connection()
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![self.key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))
    }

    fn write(&mut self, value: &str) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute(
                "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![self.key, value, Utc::now().timestamp()],
            )
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.db
            .connection()
            .execute("DELETE FROM local_storage WHERE key = ?1", params![self.key])
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}
