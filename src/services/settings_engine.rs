// mangashelf Settings Engine
// Loads, saves and edits `ShelfSettings`, stored as pretty JSON at the
// platform config path (or an explicit override).

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::ShelfSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ShelfSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ShelfSettings;
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine persisting to a JSON file.
pub struct SettingsEngine {
    config_path: String,
    settings: ShelfSettings,
}

impl SettingsEngine {
    /// Creates an engine holding defaults.
    ///
    /// `path_override` replaces `<config dir>/settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: ShelfSettings::default(),
        }
    }

    /// Creates an engine around already-built settings without touching disk.
    pub fn with_settings(path_override: Option<String>, settings: ShelfSettings) -> Self {
        let mut engine = Self::new(path_override);
        engine.settings = settings;
        engine
    }
}

/// Converts `storage.slot_key` into the JSON pointer `/storage/slot_key`.
fn pointer_for(key: &str) -> Result<String, SettingsError> {
    if key.is_empty() || key.split('.').any(|part| part.is_empty() || part.contains(&['/', '~'][..])) {
        return Err(SettingsError::InvalidKey(format!("'{}'", key)));
    }
    Ok(key.split('.').fold(String::new(), |mut acc, part| {
        acc.push('/');
        acc.push_str(part);
        acc
    }))
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from disk. A missing file yields defaults; a malformed
    /// file is an error so a typo never silently resets the configuration.
    fn load(&mut self) -> Result<ShelfSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            debug!("no settings at {}, using defaults", self.config_path);
            self.settings = ShelfSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        self.settings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        info!("loaded settings from {}", self.config_path);
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &ShelfSettings {
        &self.settings
    }

    /// Sets one value by dot-notation key (`storage.backend`, `logging.level`)
    /// and saves immediately. The key must already exist and the value must fit
    /// its type.
    fn set_value(&mut self, key: &str, value: serde_json::Value) -> Result<(), SettingsError> {
        let pointer = pointer_for(key)?;

        let mut tree = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        let slot = tree
            .pointer_mut(&pointer)
            .ok_or_else(|| SettingsError::InvalidKey(format!("'{}'", key)))?;
        *slot = value;

        self.settings = serde_json::from_value(tree).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;

        self.save()
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = ShelfSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
