// mangashelf services
// Configuration loading and editing.

pub mod settings_engine;
