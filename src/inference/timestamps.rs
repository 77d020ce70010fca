//! Date/time recognition for sampled string values

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

static TIME_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}:\d{2}(:\d{2})?$").expect("time pattern is valid"));

static DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:?\d{2})?$")
        .expect("datetime pattern is valid")
});

/// Whether `value` looks like an ISO-8601-style date, time, or date-time.
///
/// The regexes gate on shape; chrono then confirms the candidate is a real
/// calendar value, so strings like `2023-13-45` stay plain strings.
pub fn looks_like_timestamp(value: &str) -> bool {
    let v = value.trim();

    if DATE_ONLY.is_match(v) {
        return NaiveDate::parse_from_str(v, "%Y-%m-%d").is_ok();
    }

    if TIME_ONLY.is_match(v) {
        return NaiveTime::parse_from_str(v, "%H:%M:%S").is_ok()
            || NaiveTime::parse_from_str(v, "%H:%M").is_ok();
    }

    if DATE_TIME.is_match(v) {
        return DateTime::parse_from_rfc3339(v).is_ok()
            || NaiveDateTime::parse_from_str(v, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
            || NaiveDateTime::parse_from_str(v, "%Y-%m-%d %H:%M:%S%.f").is_ok()
            || DateTime::parse_from_str(v, "%Y-%m-%d %H:%M:%S%.f%z").is_ok();
    }

    false
}
