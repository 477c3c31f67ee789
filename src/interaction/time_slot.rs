//! Pointer position to time-of-day resolution for the time grid.

use chrono::NaiveTime;
use egui::Rect;
use serde::Serialize;
use thiserror::Error;

use crate::models::settings::LayoutSettings;

/// Grid resolution in minutes.
pub const SNAP_MINUTES: i64 = 15;
/// Start of the last slot of the day (23:45).
const LAST_SLOT_MINUTES: i64 = 24 * 60 - SNAP_MINUTES;

/// Vertical metrics of a day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGridMetrics {
    /// Pixels per hour.
    pub cell_height: f32,
    pub header_offset: f32,
}

impl From<&LayoutSettings> for TimeGridMetrics {
    fn from(settings: &LayoutSettings) -> Self {
        Self {
            cell_height: settings.cell_height,
            header_offset: settings.header_offset,
        }
    }
}

impl Default for TimeGridMetrics {
    fn default() -> Self {
        Self::from(&LayoutSettings::default())
    }
}

impl TimeGridMetrics {
    /// Y coordinate of `time` inside a column whose top edge is `column_top`.
    pub fn y_for_time(&self, column_top: f32, time: NaiveTime) -> f32 {
        use chrono::Timelike;
        let minutes = time.num_seconds_from_midnight() as f32 / 60.0;
        column_top + self.header_offset + minutes / 60.0 * self.cell_height
    }
}

/// A snapped time of day. Minutes are always a multiple of [`SNAP_MINUTES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SlotTime {
    hours: u32,
    minutes: u32,
}

impl SlotTime {
    pub fn new(hours: u32, minutes: u32) -> Option<Self> {
        (hours < 24 && minutes < 60 && minutes as i64 % SNAP_MINUTES == 0)
            .then_some(Self { hours, minutes })
    }

    fn from_minutes_of_day(total: i64) -> Self {
        let total = total.clamp(0, LAST_SLOT_MINUTES);
        Self {
            hours: (total / 60) as u32,
            minutes: (total % 60) as u32,
        }
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hours, self.minutes, 0).unwrap_or(NaiveTime::MIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ResolveError {
    #[error("Day column geometry is not available")]
    ColumnUnavailable,

    #[error("Time grid metrics are invalid (cell height {cell_height}, header offset {header_offset})")]
    InvalidMetrics { cell_height: f32, header_offset: f32 },

    #[error("Pointer position is not a finite number")]
    InvalidPointer,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSlotResolver {
    metrics: TimeGridMetrics,
}

impl TimeSlotResolver {
    pub fn new(metrics: TimeGridMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> TimeGridMetrics {
        self.metrics
    }

    /// Resolve a pointer Y coordinate to the nearest 15-minute slot.
    ///
    /// `column` is `None` when the day column has not been laid out yet.
    /// Snapping happens on the total minute count, so 10:53 becomes 11:00;
    /// the result is clamped to 00:00..=23:45.
    pub fn resolve(&self, pointer_y: f32, column: Option<Rect>) -> Result<SlotTime, ResolveError> {
        let column = column.ok_or(ResolveError::ColumnUnavailable)?;
        if !column.is_finite() || column.height() <= 0.0 {
            return Err(ResolveError::ColumnUnavailable);
        }

        let TimeGridMetrics {
            cell_height,
            header_offset,
        } = self.metrics;
        if !cell_height.is_finite() || cell_height <= 0.0 || !header_offset.is_finite() {
            return Err(ResolveError::InvalidMetrics {
                cell_height,
                header_offset,
            });
        }
        if !pointer_y.is_finite() {
            return Err(ResolveError::InvalidPointer);
        }

        let relative_y = f64::from(pointer_y - column.top() - header_offset);
        let total_minutes = (relative_y / f64::from(cell_height) * 60.0).round();
        let snapped = ((total_minutes / SNAP_MINUTES as f64).round() * SNAP_MINUTES as f64)
            .clamp(0.0, LAST_SLOT_MINUTES as f64);
        let slot = SlotTime::from_minutes_of_day(snapped as i64);

        log::trace!(
            "Pointer y={} resolved to {:02}:{:02}",
            pointer_y,
            slot.hours,
            slot.minutes
        );
        Ok(slot)
    }
}
