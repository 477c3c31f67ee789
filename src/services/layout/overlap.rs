//! Overlap grouping and column assignment.
//!
//! Events that overlap directly or through a chain of overlaps form one
//! group. Every member of a group of size k gets its own column and
//! `95 / k` percent of the width; lone events take the full width.

use crate::models::event::Event;

/// Share of the column width a group of overlapping events may use.
pub const GROUP_WIDTH_PCT: f32 = 95.0;
pub const FULL_WIDTH_PCT: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapPlacement {
    /// Index of the overlap group, in order of discovery.
    pub group: usize,
    pub column: usize,
    pub total_columns: usize,
    pub width_pct: f32,
    pub left_pct: f32,
}

impl OverlapPlacement {
    fn solo(group: usize) -> Self {
        Self {
            group,
            column: 0,
            total_columns: 1,
            width_pct: FULL_WIDTH_PCT,
            left_pct: 0.0,
        }
    }
}

/// Placements for one set of events, in the order the events were given.
#[derive(Debug, Clone)]
pub struct OverlapLayout<'a> {
    placements: Vec<(&'a Event, OverlapPlacement)>,
    group_count: usize,
}

impl<'a> OverlapLayout<'a> {
    pub fn iter(&self) -> impl Iterator<Item = (&'a Event, OverlapPlacement)> + '_ {
        self.placements.iter().copied()
    }

    pub fn get(&self, event_id: &str) -> Option<OverlapPlacement> {
        self.placements
            .iter()
            .find(|(event, _)| event.id == event_id)
            .map(|(_, placement)| *placement)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }
}

pub struct OverlapResolver;

impl OverlapResolver {
    /// Group `events` by transitive overlap and assign columns.
    ///
    /// Groups are discovered breadth-first from the earliest unprocessed
    /// event in input order; a member's column is its discovery index, so
    /// identical input always produces identical columns.
    pub fn resolve<'a>(events: &[&'a Event]) -> OverlapLayout<'a> {
        let count = events.len();
        let mut processed = vec![false; count];
        let mut placements: Vec<Option<OverlapPlacement>> = vec![None; count];
        let mut group_index = 0;

        for seed in 0..count {
            if processed[seed] {
                continue;
            }
            processed[seed] = true;

            let mut members = vec![seed];
            let mut cursor = 0;
            while cursor < members.len() {
                let current = events[members[cursor]];
                for other in 0..count {
                    if !processed[other] && current.overlaps(events[other]) {
                        processed[other] = true;
                        members.push(other);
                    }
                }
                cursor += 1;
            }

            if members.len() == 1 {
                placements[seed] = Some(OverlapPlacement::solo(group_index));
            } else {
                let total_columns = members.len();
                let width_pct = GROUP_WIDTH_PCT / total_columns as f32;
                for (column, &member) in members.iter().enumerate() {
                    placements[member] = Some(OverlapPlacement {
                        group: group_index,
                        column,
                        total_columns,
                        width_pct,
                        left_pct: column as f32 * width_pct,
                    });
                }
                log::trace!(
                    "Overlap group {} has {} members",
                    group_index,
                    total_columns
                );
            }
            group_index += 1;
        }

        let placements = events
            .iter()
            .zip(placements)
            .map(|(event, placement)| (*event, placement.unwrap_or(OverlapPlacement::solo(0))))
            .collect();

        OverlapLayout {
            placements,
            group_count: group_index,
        }
    }
}
