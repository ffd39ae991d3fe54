//! Lenient date parsing for text cells.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::Value;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================
// Cheap shape checks run before any chrono format is attempted.

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^\d{4}-\d{1,2}-\d{1,2}",           // ISO date
        r"^\d{1,2}/\d{1,2}/\d{4}",           // US date
        r"^\d{1,2}-\d{1,2}-\d{4}",           // European date
        r"^\d{4}/\d{1,2}/\d{1,2}",           // Alt ISO
        r"^[A-Za-z]{3,9}\.? \d{1,2},? \d{4}", // Jan 5, 2024
        r"^\d{1,2} [A-Za-z]{3,9}\.? \d{4}",   // 5 Jan 2024
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

// Month-first is tried before day-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Check if a value has the shape of a date.
pub fn looks_like_date(value: &str) -> bool {
    let trimmed = value.trim();
    DATE_PATTERNS.iter().any(|pattern| pattern.is_match(trimmed))
}

/// Parse a text cell as a date or date-time.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if !looks_like_date(trimmed) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }
    if let Some(stripped) = trimmed.strip_suffix('Z') {
        if let Some(dt) = parse_with(stripped, DATETIME_FORMATS) {
            return Some(dt);
        }
    }
    if let Some(dt) = parse_with(trimmed, DATETIME_FORMATS) {
        return Some(dt);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn parse_with(value: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Date-time view of a cell: native date-times pass through, text is parsed.
pub fn value_to_datetime(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::Text(s) => parse_datetime(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::MIN)
    }

    #[test]
    fn test_iso_dates() {
        assert_eq!(parse_datetime("2024-01-15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_datetime(" 2024/02/20 "), Some(ymd(2024, 2, 20)));
        let dt = parse_datetime("2024-03-25T10:30:00").unwrap();
        assert_eq!(dt.date(), ymd(2024, 3, 25).date());
        assert!(parse_datetime("2024-03-25T10:30:00Z").is_some());
        assert!(parse_datetime("2024-03-25T10:30:00+02:00").is_some());
    }

    #[test]
    fn test_month_first_then_day_first() {
        assert_eq!(parse_datetime("01/02/2024"), Some(ymd(2024, 1, 2)));
        assert_eq!(parse_datetime("25/12/2024"), Some(ymd(2024, 12, 25)));
        assert_eq!(parse_datetime("Jan 5, 2024"), Some(ymd(2024, 1, 5)));
        assert_eq!(parse_datetime("5 March 2024"), Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn test_rejects_non_dates() {
        assert_eq!(parse_datetime("hello"), None);
        assert_eq!(parse_datetime("2024-13-45"), None);
        assert_eq!(parse_datetime("12345"), None);
        assert_eq!(value_to_datetime(&Value::Integer(20240101)), None);
    }
}
