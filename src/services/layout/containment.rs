//! Container detection and nested layout.
//!
//! An event whose span encloses other events becomes a container. The
//! enclosed events are laid out against each other and squeezed into the
//! container's inner band so the container stays visible around them.

use super::overlap::OverlapResolver;
use crate::models::event::Event;
use crate::models::segment::Segment;

pub const CONTAINER_WIDTH_PCT: f32 = 95.0;
pub const CONTAINER_Z_INDEX: i32 = 5;
pub const CONTAINED_Z_BASE: i32 = 10;
/// Inner band: 92% of the container width, starting 4% in.
pub const INNER_BAND_RATIO: f32 = 0.92;
pub const INNER_BAND_OFFSET_PCT: f32 = 4.0;

/// Result of the containment pass.
#[derive(Debug, Clone, Default)]
pub struct ContainmentResult<'a> {
    /// Container segments, each followed by the segments nested in it.
    pub segments: Vec<Segment>,
    /// Events that are neither containers nor contained, in input order.
    pub unconstrained: Vec<&'a Event>,
}

impl ContainmentResult<'_> {
    pub fn container_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_container).count()
    }
}

pub struct ContainmentProcessor;

impl ContainmentProcessor {
    pub fn process<'a>(events: &[&'a Event]) -> ContainmentResult<'a> {
        let count = events.len();
        let mut processed = vec![false; count];
        let mut segments = Vec::new();

        // Longest first; the sort is stable so ties keep input order.
        let mut candidates: Vec<usize> = (0..count).collect();
        candidates.sort_by(|&a, &b| events[b].duration().cmp(&events[a].duration()));

        for candidate in candidates {
            if processed[candidate] {
                continue;
            }
            let container = events[candidate];

            let enclosed: Vec<usize> = (0..count)
                .filter(|&other| {
                    other != candidate && !processed[other] && container.encloses(events[other])
                })
                .collect();
            if enclosed.is_empty() {
                continue;
            }

            processed[candidate] = true;
            for &index in &enclosed {
                processed[index] = true;
            }

            segments.push(Segment {
                event_id: container.id.clone(),
                column: 0,
                total_columns: 1,
                left_pct: 0.0,
                width_pct: CONTAINER_WIDTH_PCT,
                z_index: CONTAINER_Z_INDEX,
                is_container: true,
                is_contained: false,
            });

            let members: Vec<&Event> = enclosed.iter().map(|&index| events[index]).collect();
            let inner = OverlapResolver::resolve(&members);
            let band = CONTAINER_WIDTH_PCT * INNER_BAND_RATIO / 100.0;

            for (event, placement) in inner.iter() {
                segments.push(Segment {
                    event_id: event.id.clone(),
                    column: placement.column,
                    total_columns: placement.total_columns,
                    left_pct: INNER_BAND_OFFSET_PCT + placement.left_pct * band,
                    width_pct: placement.width_pct * band,
                    z_index: CONTAINED_Z_BASE + placement.column as i32,
                    is_container: false,
                    is_contained: true,
                });
            }

            log::trace!(
                "Event '{}' contains {} event(s)",
                container.id,
                members.len()
            );
        }

        let unconstrained = events
            .iter()
            .zip(&processed)
            .filter(|(_, done)| !**done)
            .map(|(event, _)| *event)
            .collect();

        ContainmentResult {
            segments,
            unconstrained,
        }
    }
}
