use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use super::mapper::{settings_from_toml, settings_to_toml};
use crate::models::settings::LayoutSettings;

pub const SETTINGS_FILE_NAME: &str = "layout.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "CalendarLayout", "CalendarLayout")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
    }

    pub fn from_default_location() -> Result<Self> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow!("Could not determine a configuration directory"))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when the file does not exist.
    pub fn load(&self) -> Result<LayoutSettings> {
        if !self.path.exists() {
            log::info!(
                "No layout settings at {}, using defaults",
                self.path.display()
            );
            return Ok(LayoutSettings::default());
        }

        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let settings = settings_from_toml(&text)
            .with_context(|| format!("Invalid settings file {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        log::debug!("Loaded layout settings from {}", self.path.display());
        Ok(settings)
    }

    pub fn save(&self, settings: &LayoutSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let text = settings_to_toml(settings)?;
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        log::info!("Saved layout settings to {}", self.path.display());
        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        self.save(&LayoutSettings::default())
    }
}
