//! App Core for mangashelf.
//!
//! Wires settings, the configured storage slot and the bookmark store, and
//! hands out the shared `BookmarkHandle` to view code.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::database::Database;
use crate::managers::bookmark_handle::BookmarkHandle;
use crate::managers::bookmark_store::{BookmarkStore, BookmarkStoreTrait};
use crate::platform;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::storage::{FileSlot, MemorySlot, SqliteSlot, StorageSlot};
use crate::types::errors::{AppError, StorageError};
use crate::types::settings::{ShelfSettings, StorageBackend};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MANGASHELF_DATA_DIR";

/// File name of the SQLite database used by the `sqlite` backend.
pub const DATABASE_FILE: &str = "shelf.db";

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub bookmarks: BookmarkHandle,
}

impl App {
    /// Loads settings from `config_path` (or the platform default) and opens the shelf.
    ///
    /// # Errors
    /// Fails only when the settings file exists but cannot be read or parsed.
    pub fn new(config_path: Option<String>) -> Result<Self, AppError> {
        let mut settings_engine = SettingsEngine::new(config_path);
        settings_engine.load()?;
        Ok(Self::from_engine(settings_engine))
    }

    /// Opens the shelf described by an already-loaded settings engine.
    pub fn from_engine(settings_engine: SettingsEngine) -> Self {
        let settings = settings_engine.get_settings().clone();
        let data_dir = resolve_data_dir(&settings);
        let slot = open_slot(&settings, &data_dir).unwrap_or_else(|e| {
            error!(
                "could not open {:?} storage in {}, bookmarks will not survive this session: {}",
                settings.storage.backend,
                data_dir.display(),
                e
            );
            Box::new(MemorySlot::new(settings.storage.slot_key.clone()))
        });

        let store = BookmarkStore::open(slot);
        info!(
            "opened bookmark slot {} ({:?} backend, {} bookmarks)",
            store.slot_key(),
            settings.storage.backend,
            store.len()
        );
        let bookmarks = BookmarkHandle::new(store);

        Self {
            settings_engine,
            bookmarks,
        }
    }

    /// A memory-backed app that never touches disk.
    pub fn in_memory() -> Self {
        let mut settings = ShelfSettings::default();
        settings.storage.backend = StorageBackend::Memory;
        Self::from_engine(SettingsEngine::with_settings(None, settings))
    }
}

/// `MANGASHELF_DATA_DIR`, then `storage.data_dir`, then the platform data directory.
pub fn resolve_data_dir(settings: &ShelfSettings) -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    match &settings.storage.data_dir {
        Some(dir) => PathBuf::from(dir),
        None => platform::get_data_dir(),
    }
}

/// Builds the storage slot selected by `settings.storage.backend`.
pub fn open_slot(
    settings: &ShelfSettings,
    data_dir: &Path,
) -> Result<Box<dyn StorageSlot>, StorageError> {
    let key = settings.storage.slot_key.clone();
    match settings.storage.backend {
        StorageBackend::Memory => Ok(Box::new(MemorySlot::new(key))),
        StorageBackend::File => Ok(Box::new(FileSlot::new(data_dir, key))),
        StorageBackend::Sqlite => {
            fs::create_dir_all(data_dir).map_err(|e| {
                StorageError::WriteFailed(format!("create {}: {}", data_dir.display(), e))
            })?;
            let db = Database::open(data_dir.join(DATABASE_FILE))?;
            Ok(Box::new(SqliteSlot::new(db, key)))
        }
    }
}
