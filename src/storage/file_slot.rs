//! File-backed storage slot: `<dir>/<key>.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::StorageSlot;
use crate::types::errors::StorageError;

/// Stores the slot payload in a single file inside `dir`.
///
/// Writes land in a sibling `.tmp` file first and are renamed over the target,
/// so readers only ever see a complete payload.
#[derive(Debug, Clone)]
pub struct FileSlot {
    key: String,
    path: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl AsRef<Path>, key: impl Into<String>) -> Self {
        let key = key.into();
        let path = dir.as_ref().join(format!("{}.json", file_stem(&key)));
        Self { key, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

/// Keeps the key usable as a file name on every platform.
fn file_stem(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "slot".to_string()
    } else {
        stem
    }
}

impl StorageSlot for FileSlot {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn write(&mut self, value: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::WriteFailed(format!("create {}: {}", parent.display(), e))
            })?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, value)
            .map_err(|e| StorageError::WriteFailed(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            StorageError::WriteFailed(format!("{}: {}", self.path.display(), e))
        })
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::WriteFailed(format!(
                "{}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
