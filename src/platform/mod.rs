// mangashelf platform paths
// Resolves per-user config and data directories through the `dirs` crate.
//
// - Linux:   $XDG_CONFIG_HOME/mangashelf, $XDG_DATA_HOME/mangashelf
// - macOS:   ~/Library/Application Support/mangashelf (both)
// - Windows: %APPDATA%\mangashelf (both)

use std::path::PathBuf;

pub const APP_NAME: &str = "mangashelf";

/// Returns the configuration directory, or `./mangashelf` when the platform has none.
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the data directory holding the storage slots, or `./mangashelf` when the platform has none.
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}
