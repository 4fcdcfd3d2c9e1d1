//! Wall-clock timestamps in the ISO-8601 shape `Date#toISOString` produces.

use chrono::{DateTime, SecondsFormat, Utc};

/// Returns the current UTC time, e.g. `2026-10-16T09:30:00.123Z`.
pub fn now_iso() -> String {
    format_iso(Utc::now())
}

/// Formats a UTC time with millisecond precision and a `Z` suffix.
pub fn format_iso(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
