//! Calendar/time string handling for the `timestamp` primitive.
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Timelike, Utc};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a wire timestamp. Offsets are honoured; naive forms are taken as UTC.
///
/// The result is truncated to whole milliseconds, the precision of [`format`].
pub fn parse(src: &str) -> Option<DateTime<Utc>> {
    parse_exact(src.trim()).map(truncate)
}

/// Drop everything below the millisecond.
pub fn truncate(t: DateTime<Utc>) -> DateTime<Utc> {
    let nanos = t.nanosecond();
    t.with_nanosecond(nanos - nanos % 1_000_000).unwrap_or(t)
}

fn parse_exact(src: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(src) {
        return Some(t.with_timezone(&Utc));
    }
    // `+0200` style offsets
    if let Ok(t) = DateTime::parse_from_str(src, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(t.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(src, fmt) {
            return Some(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(src, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

/// Canonical wire form: `2024-09-01T10:00:00.000Z`.
pub fn format(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}
