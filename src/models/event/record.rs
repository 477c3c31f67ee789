//! Wire record for events handed over by the store collaborator.
//!
//! Records are converted one at a time so that a bad record never takes the
//! rest of the day down with it. The interval itself is checked later by the
//! layout engine, which reports it alongside the layout.

use serde::{Deserialize, Serialize};

use super::{Event, EventError};
use crate::utils::date::parse_instant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "isAllDay", default)]
    pub is_all_day: bool,
    pub calendar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TryFrom<EventRecord> for Event {
    type Error = EventError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        if record.id.trim().is_empty() {
            return Err(EventError::EmptyId);
        }

        let start = parse_instant(&record.start_time).ok_or_else(|| EventError::InvalidTimestamp {
            field: "start_time",
            value: record.start_time.clone(),
        })?;
        let end = parse_instant(&record.end_time).ok_or_else(|| EventError::InvalidTimestamp {
            field: "end_time",
            value: record.end_time.clone(),
        })?;
        let calendar = record.calendar.parse()?;

        Ok(Event {
            id: record.id,
            title: record.title,
            start,
            end,
            all_day: record.is_all_day,
            calendar,
            completed: record.completed.unwrap_or(false),
        })
    }
}

/// Convert records, keeping the good ones in input order and returning
/// `(record id, error)` for the rest.
pub fn events_from_records(
    records: impl IntoIterator<Item = EventRecord>,
) -> (Vec<Event>, Vec<(String, EventError)>) {
    let mut events = Vec::new();
    let mut failures = Vec::new();

    for record in records {
        let id = record.id.clone();
        match Event::try_from(record) {
            Ok(event) => events.push(event),
            Err(err) => {
                log::warn!("Skipping event record '{}': {}", id, err);
                failures.push((id, err));
            }
        }
    }

    (events, failures)
}
