//! RFC 3339 timestamp helpers.
//!
//! Persisted records carry timestamps as RFC 3339 strings; instants are
//! generated and compared as [`OffsetDateTime`] and formatted at the edge.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Format an instant as RFC 3339. Falls back to `"unknown"` on the
/// (practically unreachable) formatting failure rather than panicking.
pub fn to_rfc3339(instant: OffsetDateTime) -> String {
    instant
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Current UTC instant as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    to_rfc3339(OffsetDateTime::now_utc())
}

/// Parse an RFC 3339 timestamp, `None` when malformed.
pub fn parse_rfc3339(value: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(value, &Rfc3339).ok()
}

/// Parse the calendar-date part of a stored date string.
///
/// Store dates are `YYYY-MM-DD`, sometimes with a trailing `T...` time
/// part; only the text before the first `T` is considered.
pub fn parse_date_part(value: &str) -> Option<Date> {
    let date_part = value.split('T').next().unwrap_or(value);
    Date::parse(date_part, format_description!("[year]-[month]-[day]")).ok()
}
