use chrono::{DateTime, SecondsFormat, Utc};

/// Current time as an RFC 3339 UTC string with millisecond precision, e.g.
/// `2026-08-04T12:34:56.789Z`. Lexicographic order equals chronological
/// order, which is what keeps `created_at <= updated_at` a plain string
/// comparison.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Date part of a stored timestamp for display; falls back to the raw value
/// when it does not parse.
pub fn format_date(value: &str) -> String {
    match DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => parsed.format("%Y-%m-%d").to_string(),
        Err(_) => value.to_string(),
    }
}
