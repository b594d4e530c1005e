//! Durable storage slots.
//!
//! A slot is a single named entry holding one string payload, the moral
//! equivalent of a browser `localStorage` key. The bookmark store owns exactly
//! one slot and rewrites it in full on every mutation.

pub mod file_slot;
pub mod sqlite_slot;

pub use file_slot::FileSlot;
pub use sqlite_slot::SqliteSlot;

use crate::types::errors::StorageError;

/// A named, durable string slot.
pub trait StorageSlot: Send {
    /// Name of the slot.
    fn key(&self) -> &str;
    /// Returns the stored payload, or `None` if the slot was never written.
    fn read(&self) -> Result<Option<String>, StorageError>;
    /// Replaces the stored payload.
    fn write(&mut self, value: &str) -> Result<(), StorageError>;
    /// Removes the slot entirely; a later `read` returns `None`.
    fn clear(&mut self) -> Result<(), StorageError>;
}

impl<T: StorageSlot + ?Sized> StorageSlot for Box<T> {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        (**self).read()
    }

    fn write(&mut self, value: &str) -> Result<(), StorageError> {
        (**self).write(value)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// Process-local slot. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    key: String,
    value: Option<String>,
}

impl MemorySlot {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// A slot that starts out holding `value`, as if written by an earlier session.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

impl StorageSlot for MemorySlot {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> Result<(), StorageError> {
        self.value = Some(value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.value = None;
        Ok(())
    }
}
