use crate::models::settings::LayoutSettings;
use anyhow::{Context, Result};

pub fn settings_from_toml(text: &str) -> Result<LayoutSettings> {
    let settings: LayoutSettings =
        toml::from_str(text).context("Failed to parse layout settings")?;
    Ok(settings)
}

pub fn settings_to_toml(settings: &LayoutSettings) -> Result<String> {
    toml::to_string_pretty(settings).context("Failed to serialize layout settings")
}
