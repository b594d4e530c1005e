use std::error::Error;

use mangashelf::types::errors::*;

// === StorageError Tests ===

#[test]
fn storage_error_display_variants() {
    assert_eq!(
        StorageError::ReadFailed("permission denied".to_string()).to_string(),
        "Storage read failed: permission denied"
    );
    assert_eq!(
        StorageError::WriteFailed("disk full".to_string()).to_string(),
        "Storage write failed: disk full"
    );
    assert_eq!(
        StorageError::Corrupt("expected a sequence".to_string()).to_string(),
        "Stored bookmarks are corrupt: expected a sequence"
    );
    assert_eq!(
        StorageError::DatabaseError("locked".to_string()).to_string(),
        "Storage database error: locked"
    );
}

#[test]
fn storage_error_from_rusqlite() {
    let err: StorageError = rusqlite::Error::QueryReturnedNoRows.into();
    assert!(matches!(err, StorageError::DatabaseError(_)));
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("nope".to_string()).to_string(),
        "Settings I/O error: nope"
    );
    assert_eq!(
        SettingsError::SerializationError("eof".to_string()).to_string(),
        "Settings serialization error: eof"
    );
    assert_eq!(
        SettingsError::InvalidKey("'a.b'".to_string()).to_string(),
        "Invalid settings key: 'a.b'"
    );
    assert_eq!(
        SettingsError::InvalidValue("bad".to_string()).to_string(),
        "Invalid settings value: bad"
    );
}

// === AppError Tests ===

#[test]
fn app_error_wraps_source() {
    let err: AppError = SettingsError::IoError("nope".to_string()).into();
    assert_eq!(err.to_string(), "Startup failed: Settings I/O error: nope");
    assert!(err.source().is_some());

    let err: AppError = StorageError::WriteFailed("full".to_string()).into();
    assert_eq!(err.to_string(), "Startup failed: Storage write failed: full");
}

#[test]
fn errors_implement_error_trait() {
    let err: Box<dyn Error> = Box::new(StorageError::Corrupt("x".to_string()));
    assert!(err.source().is_none());
}
