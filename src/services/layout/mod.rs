// Layout engine
// Turns one day column of events into positioned segments

pub mod containment;
pub mod overlap;

pub use containment::{ContainmentProcessor, ContainmentResult};
pub use overlap::{OverlapLayout, OverlapPlacement, OverlapResolver};

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::event::{Event, EventError};
use crate::models::segment::Segment;

pub const UNCONSTRAINED_Z_BASE: i32 = 15;

/// An event left out of a layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error(transparent)]
    InvalidEvent(#[from] EventError),

    #[error("Duplicate event id '{0}'")]
    DuplicateId(String),
}

impl LayoutError {
    pub fn event_id(&self) -> Option<&str> {
        match self {
            LayoutError::InvalidEvent(EventError::InvalidInterval { id, .. }) => Some(id),
            LayoutError::InvalidEvent(_) => None,
            LayoutError::DuplicateId(id) => Some(id),
        }
    }
}

/// Output of one layout pass.
#[derive(Debug, Clone, Default)]
pub struct DayLayout {
    segments: Vec<Segment>,
    rejected: Vec<LayoutError>,
}

impl DayLayout {
    /// Segments in paint order: containers with their contents, then the rest.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn rejected(&self) -> &[LayoutError] {
        &self.rejected
    }

    pub fn get(&self, event_id: &str) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.event_id == event_id)
    }

    pub fn by_id(&self) -> HashMap<&str, &Segment> {
        self.segments
            .iter()
            .map(|segment| (segment.event_id.as_str(), segment))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Segment>, Vec<LayoutError>) {
        (self.segments, self.rejected)
    }
}

/// Stateless layout orchestrator. Cheap to copy and safe to call every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    pub fn new() -> Self {
        Self
    }

    /// Lay out every event of one column.
    ///
    /// Invalid events are reported in [`DayLayout::rejected`] and the rest
    /// are still laid out.
    pub fn layout(&self, events: &[Event]) -> DayLayout {
        let mut seen = HashSet::new();
        let mut valid: Vec<&Event> = Vec::with_capacity(events.len());
        let mut rejected = Vec::new();

        for event in events {
            if let Err(err) = event.validate_interval() {
                log::warn!("Excluding event from layout: {}", err);
                rejected.push(LayoutError::from(err));
                continue;
            }
            if !seen.insert(event.id.as_str()) {
                log::warn!("Excluding duplicate event id '{}' from layout", event.id);
                rejected.push(LayoutError::DuplicateId(event.id.clone()));
                continue;
            }
            valid.push(event);
        }

        let containment = ContainmentProcessor::process(&valid);
        let container_count = containment.container_count();
        let mut segments = containment.segments;

        let remainder = OverlapResolver::resolve(&containment.unconstrained);
        segments.extend(remainder.iter().map(|(event, placement)| Segment {
            event_id: event.id.clone(),
            column: placement.column,
            total_columns: placement.total_columns,
            left_pct: placement.left_pct,
            width_pct: placement.width_pct,
            z_index: UNCONSTRAINED_Z_BASE + placement.column as i32,
            is_container: false,
            is_contained: false,
        }));

        log::debug!(
            "Laid out {} event(s): {} container(s), {} rejected",
            segments.len(),
            container_count,
            rejected.len()
        );

        DayLayout { segments, rejected }
    }

    /// Lay out the timed events that start on `date`. All-day events belong
    /// to the all-day strip and are skipped.
    pub fn layout_day(&self, events: &[Event], date: NaiveDate) -> DayLayout {
        let column: Vec<Event> = events
            .iter()
            .filter(|event| !event.all_day && event.start.date_naive() == date)
            .cloned()
            .collect();
        self.layout(&column)
    }
}
