//! Configuration module for the festival service
//!
//! Path resolution and the settings file kept in the config directory.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::Settings;
