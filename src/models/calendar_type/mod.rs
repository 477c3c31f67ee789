//! Calendar type model.
//!
//! Every event belongs to one calendar type (Work, Personal, etc.). The type
//! drives the colour and icon the rendering layer uses. The set is closed so
//! that every lookup is checked for exhaustiveness at compile time.

use std::fmt;
use std::str::FromStr;

use egui::Color32;
use serde::{Deserialize, Serialize};

use super::event::EventError;

/// The calendar an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    Work,
    Personal,
    Birthday,
    Holiday,
    Meeting,
    Deadline,
}

/// Colour and icon for one calendar type under one theme brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarStyle {
    pub color: Color32,
    pub icon: &'static str,
}

/// Lookup row: (type, tag, light colour, dark colour, icon).
type StyleRow = (CalendarType, &'static str, &'static str, &'static str, &'static str);

const STYLE_TABLE: [StyleRow; 6] = [
    (CalendarType::Work, "work", "#3B82F6", "#60A5FA", "💼"),
    (CalendarType::Personal, "personal", "#10B981", "#34D399", "🏠"),
    (CalendarType::Birthday, "birthday", "#F59E0B", "#FBBF24", "🎂"),
    (CalendarType::Holiday, "holiday", "#EF4444", "#F87171", "🎉"),
    (CalendarType::Meeting, "meeting", "#8B5CF6", "#A78BFA", "👥"),
    (CalendarType::Deadline, "deadline", "#DC2626", "#FCA5A5", "⏰"),
];

impl CalendarType {
    pub const ALL: [CalendarType; 6] = [
        CalendarType::Work,
        CalendarType::Personal,
        CalendarType::Birthday,
        CalendarType::Holiday,
        CalendarType::Meeting,
        CalendarType::Deadline,
    ];

    fn row(self) -> &'static StyleRow {
        match self {
            CalendarType::Work => &STYLE_TABLE[0],
            CalendarType::Personal => &STYLE_TABLE[1],
            CalendarType::Birthday => &STYLE_TABLE[2],
            CalendarType::Holiday => &STYLE_TABLE[3],
            CalendarType::Meeting => &STYLE_TABLE[4],
            CalendarType::Deadline => &STYLE_TABLE[5],
        }
    }

    /// The lowercase tag used on the wire.
    pub fn tag(self) -> &'static str {
        self.row().1
    }

    /// Hex colour for the given theme brightness.
    pub fn hex_color(self, dark_mode: bool) -> &'static str {
        let row = self.row();
        if dark_mode {
            row.3
        } else {
            row.2
        }
    }

    pub fn icon(self) -> &'static str {
        self.row().4
    }

    /// Resolve colour and icon. `dark_mode` is passed in by the caller; the
    /// engine never reads theme state itself.
    pub fn style(self, dark_mode: bool) -> CalendarStyle {
        CalendarStyle {
            // Table literals are checked in tests.
            color: parse_hex_color(self.hex_color(dark_mode)).unwrap_or(Color32::GRAY),
            icon: self.icon(),
        }
    }
}

impl fmt::Display for CalendarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CalendarType {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        STYLE_TABLE
            .iter()
            .find(|row| row.1.eq_ignore_ascii_case(wanted))
            .map(|row| row.0)
            .ok_or_else(|| EventError::UnknownCalendarType(s.to_string()))
    }
}

/// Parse a `#RRGGBB` hex string to Color32.
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}
