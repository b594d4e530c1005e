use std::fmt;

// === StorageError ===

/// Errors raised by a durable storage slot.
///
/// The bookmark store never returns these to its callers; it logs them and
/// keeps its in-memory state authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The slot exists but could not be read.
    ReadFailed(String),
    /// The slot could not be written (disk full, permissions, ...).
    WriteFailed(String),
    /// The slot was read but its payload is not a bookmark list.
    Corrupt(String),
    /// Database operation failed.
    DatabaseError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadFailed(msg) => write!(f, "Storage read failed: {}", msg),
            StorageError::WriteFailed(msg) => write!(f, "Storage write failed: {}", msg),
            StorageError::Corrupt(msg) => write!(f, "Stored bookmarks are corrupt: {}", msg),
            StorageError::DatabaseError(msg) => write!(f, "Storage database error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::DatabaseError(e.to_string())
    }
}

// === SettingsError ===

/// Errors related to settings operations.
#[derive(Debug)]
pub enum SettingsError {
    /// I/O error reading or writing the settings file.
    IoError(String),
    /// JSON serialization or deserialization failed.
    SerializationError(String),
    /// The provided settings key is unknown.
    InvalidKey(String),
    /// The provided value does not fit the key's type.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => write!(f, "Invalid settings value: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

// === AppError ===

/// Errors that can stop the application from starting.
#[derive(Debug)]
pub enum AppError {
    Settings(SettingsError),
    Storage(StorageError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Settings(e) => write!(f, "Startup failed: {}", e),
            AppError::Storage(e) => write!(f, "Startup failed: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Settings(e) => Some(e),
            AppError::Storage(e) => Some(e),
        }
    }
}

impl From<SettingsError> for AppError {
    fn from(e: SettingsError) -> Self {
        AppError::Settings(e)
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Storage(e)
    }
}
