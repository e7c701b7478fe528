//! Service settings
//!
//! Stored as settings.json in the config directory and written with
//! defaults on first start.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::Paths;

/// Service settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Seed snapshot loaded at startup, relative to the config directory
    #[serde(default = "default_seed_file")]
    pub seed_file: String,

    /// Origins allowed by CORS; empty allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// HTTP worker count; 0 keeps the actix default
    #[serde(default)]
    pub workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed_file: default_seed_file(),
            allowed_origins: Vec::new(),
            workers: 0,
        }
    }
}

impl Settings {
    /// Load settings from the config directory, creating the file if missing
    pub fn load(paths: &Paths) -> Result<Self> {
        let settings_path = paths.settings_path();

        if settings_path.exists() {
            let content =
                std::fs::read_to_string(&settings_path).context("Failed to read settings file")?;
            serde_json::from_str(&content).context("Failed to parse settings file")
        } else {
            let settings = Self::default();
            settings.save(paths)?;
            Ok(settings)
        }
    }

    /// Save settings to the config directory
    pub fn save(&self, paths: &Paths) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(paths.settings_path(), content).context("Failed to write settings file")?;
        Ok(())
    }

    /// Snapshot location, letting an explicit override win over the settings file
    pub fn seed_path(&self, paths: &Paths, override_path: Option<PathBuf>) -> PathBuf {
        match override_path {
            Some(path) => path,
            None => paths.resolve(&self.seed_file),
        }
    }
}

fn default_seed_file() -> String {
    "festivals.json".to_string()
}
