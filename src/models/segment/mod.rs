//! Positioned segment produced by a layout pass.
//!
//! Segments are transient: they are rebuilt on every layout pass and never
//! stored. Horizontal placement is in percent of the day column width; the
//! renderer maps it onto its own column rectangle.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub event_id: String,
    /// Column inside the overlap group the segment was placed in.
    pub column: usize,
    pub total_columns: usize,
    pub left_pct: f32,
    pub width_pct: f32,
    pub z_index: i32,
    pub is_container: bool,
    pub is_contained: bool,
}

impl Segment {
    pub fn right_pct(&self) -> f32 {
        self.left_pct + self.width_pct
    }
}
