// Date utility functions
// Instants keep the UTC offset they were read with; nothing here converts zones.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Parse an ISO-8601 instant.
///
/// RFC 3339 strings (`2025-03-10T09:00:00+01:00`, `...Z`) keep their offset.
/// A timestamp without an offset is read as UTC.
pub fn parse_instant(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant);
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()?;
    FixedOffset::east_opt(0)?.from_local_datetime(&naive).single()
}

/// Build an instant from wall-clock parts in the given offset.
pub fn combine(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    offset.from_local_datetime(&date.and_time(time)).single()
}

/// Move `instant` onto `date`, keeping its time of day and offset.
pub fn with_date(instant: DateTime<FixedOffset>, date: NaiveDate) -> Option<DateTime<FixedOffset>> {
    combine(date, instant.time(), *instant.offset())
}
