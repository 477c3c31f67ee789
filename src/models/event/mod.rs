// Event module
// Read-only event snapshot consumed by the layout engine and drag controller

mod record;

pub use record::{events_from_records, EventRecord};

use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;
use thiserror::Error;

use super::calendar_type::CalendarType;

/// Calendar event as seen by the layout engine.
///
/// The external store owns events; the engine only reads snapshots of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: Option<String>,
    #[serde(rename = "start_time")]
    pub start: DateTime<FixedOffset>,
    #[serde(rename = "end_time")]
    pub end: DateTime<FixedOffset>,
    #[serde(rename = "isAllDay")]
    pub all_day: bool,
    pub calendar: CalendarType,
    pub completed: bool,
}

/// Failures while constructing or validating an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("Event id cannot be empty")]
    EmptyId,

    #[error("Event '{id}' must end after it starts (start {start}, end {end})")]
    InvalidInterval {
        id: String,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },

    #[error("Invalid {field} '{value}' (expected an ISO-8601 instant)")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("Unknown calendar type '{0}'")]
    UnknownCalendarType(String),

    #[error("Event {0} is required")]
    MissingField(&'static str),
}

impl Event {
    /// Create a new timed event with required fields
    ///
    /// # Examples
    /// ```
    /// use calendar_layout::models::calendar_type::CalendarType;
    /// use calendar_layout::models::event::Event;
    /// use calendar_layout::utils::date::parse_instant;
    ///
    /// let start = parse_instant("2025-03-10T09:00:00Z").unwrap();
    /// let end = parse_instant("2025-03-10T10:00:00Z").unwrap();
    /// let event = Event::new("standup", start, end, CalendarType::Work).unwrap();
    /// assert_eq!(event.duration().num_minutes(), 60);
    /// ```
    pub fn new(
        id: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        calendar: CalendarType,
    ) -> Result<Self, EventError> {
        let event = Self {
            id: id.into(),
            title: None,
            start,
            end,
            all_day: false,
            calendar,
            completed: false,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), EventError> {
        if self.id.trim().is_empty() {
            return Err(EventError::EmptyId);
        }
        self.validate_interval()
    }

    /// Check the `end > start` invariant only.
    pub fn validate_interval(&self) -> Result<(), EventError> {
        if self.end <= self.start {
            return Err(EventError::InvalidInterval {
                id: self.id.clone(),
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Half-open overlap: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Closed-interval containment of `other` within `self`.
    pub fn encloses(&self, other: &Event) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    id: Option<String>,
    title: Option<String>,
    start: Option<DateTime<FixedOffset>>,
    end: Option<DateTime<FixedOffset>>,
    all_day: bool,
    calendar: CalendarType,
    completed: bool,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            start: None,
            end: None,
            all_day: false,
            calendar: CalendarType::Personal,
            completed: false,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: DateTime<FixedOffset>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<FixedOffset>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn calendar(mut self, calendar: CalendarType) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Build the event
    pub fn build(self) -> Result<Event, EventError> {
        let id = self.id.ok_or(EventError::MissingField("id"))?;
        let start = self.start.ok_or(EventError::MissingField("start time"))?;
        let end = self.end.ok_or(EventError::MissingField("end time"))?;

        let event = Event {
            id,
            title: self.title,
            start,
            end,
            all_day: self.all_day,
            calendar: self.calendar,
            completed: self.completed,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
