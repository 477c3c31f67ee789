// Test fixtures - reusable test data
// Provides consistent days of events across all test files
#![allow(dead_code)]

use calendar_layout::models::calendar_type::CalendarType;
use calendar_layout::models::event::Event;
use chrono::{DateTime, FixedOffset, NaiveDate};

/// Sample dates for testing
pub mod dates {
    use super::*;
    use calendar_layout::utils::date::parse_instant;

    /// Monday, March 10, 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    /// Wednesday, March 12, 2025
    pub fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
    }

    /// Instant on Monday at `hh:mm`, UTC+01:00
    pub fn at(hh_mm: &str) -> DateTime<FixedOffset> {
        parse_instant(&format!("2025-03-10T{}:00+01:00", hh_mm)).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// Event on Monday without validation, so broken intervals can be built too.
    pub fn event(id: &str, start: &str, end: &str) -> Event {
        Event {
            id: id.to_string(),
            title: None,
            start: dates::at(start),
            end: dates::at(end),
            all_day: false,
            calendar: CalendarType::Work,
            completed: false,
        }
    }

    /// A[10:00-11:00] and B[10:30-11:30]
    pub fn overlapping_pair() -> Vec<Event> {
        vec![event("A", "10:00", "11:00"), event("B", "10:30", "11:30")]
    }

    /// A[09:00-12:00] containing B[10:00-10:30]
    pub fn nested_pair() -> Vec<Event> {
        vec![event("A", "09:00", "12:00"), event("B", "10:00", "10:30")]
    }

    /// A-B and B-C overlap; A and C do not.
    pub fn overlap_chain() -> Vec<Event> {
        vec![
            event("A", "09:00", "10:00"),
            event("B", "09:30", "10:30"),
            event("C", "10:15", "11:00"),
        ]
    }

    /// C[14:00-14:30]
    pub fn afternoon_meeting() -> Event {
        Event {
            calendar: CalendarType::Meeting,
            ..event("C", "14:00", "14:30")
        }
    }

    /// A busy Monday mixing containers, overlaps and lone events.
    pub fn busy_day() -> Vec<Event> {
        vec![
            event("standup", "09:00", "09:15"),
            event("workshop", "10:00", "13:00"),
            event("break", "11:00", "11:30"),
            event("call", "11:15", "12:00"),
            event("lunch", "12:30", "13:30"),
            event("review", "13:15", "14:00"),
            event("focus", "15:00", "17:00"),
            event("wrap-up", "17:00", "17:30"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_events_are_valid() {
        for event in events::busy_day() {
            assert!(event.validate().is_ok(), "{} should be valid", event.id);
        }
        assert!(events::afternoon_meeting().validate().is_ok());
    }
}
