use serde::{Deserialize, Serialize};

/// Default name of the storage slot holding the bookmark list.
pub const DEFAULT_SLOT_KEY: &str = "mangaBookmarks";

/// Top-level settings container.
///
/// Every section falls back to its defaults when missing from the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ShelfSettings {
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

/// Where and how the bookmark list is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub slot_key: String,
    /// Overrides the platform data directory when set.
    pub data_dir: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            data_dir: None,
        }
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per slot in the data directory.
    File,
    /// A row in the `local_storage` table of `shelf.db`.
    Sqlite,
    /// Nothing survives the process.
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `env_logger` filter, e.g. `info` or `mangashelf=debug`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
