// Settings module
// Explicit configuration for the time grid; nothing here is read from global state

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CELL_HEIGHT: f32 = 60.0;
pub const DEFAULT_HEADER_OFFSET: f32 = 40.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Pixels per hour in the time grid.
    pub cell_height: f32,
    /// Pixels between the top of a day column and its 00:00 line.
    pub header_offset: f32,
    pub dark_mode: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            cell_height: DEFAULT_CELL_HEIGHT,
            header_offset: DEFAULT_HEADER_OFFSET,
            dark_mode: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsValidationError {
    #[error("cell_height must be a positive number of pixels, got {0}")]
    InvalidCellHeight(f32),

    #[error("header_offset must be zero or more pixels, got {0}")]
    InvalidHeaderOffset(f32),
}

impl LayoutSettings {
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        if !self.cell_height.is_finite() || self.cell_height <= 0.0 {
            return Err(SettingsValidationError::InvalidCellHeight(self.cell_height));
        }
        if !self.header_offset.is_finite() || self.header_offset < 0.0 {
            return Err(SettingsValidationError::InvalidHeaderOffset(self.header_offset));
        }
        Ok(())
    }

    /// Full height of a day column, header included.
    pub fn column_height(&self) -> f32 {
        self.header_offset + self.cell_height * 24.0
    }
}
