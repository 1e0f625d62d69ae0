//! Permissive date and timestamp parsing.
//!
//! Sheet exports mix ISO dates, US-style dates, long month names and
//! spreadsheet serial numbers. These helpers accept all of them and hand
//! back typed chrono values; anything unrecognized is `None`.

use chrono::{DateTime, Datelike, Duration, Month, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Date-only formats tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Date-time formats (without zone) tried in order, read as UTC.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Largest spreadsheet serial accepted (9999-12-31).
const MAX_SERIAL_DAY: i64 = 2_958_465;

/// Parses a date string in any supported format.
///
/// # Example
///
/// ```
/// use absence_engine::processing::parse_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 3, 5);
/// assert_eq!(parse_date("2024-03-05"), expected);
/// assert_eq!(parse_date("3/5/2024"), expected);
/// assert_eq!(parse_date("March 5, 2024"), expected);
/// assert_eq!(parse_date("2024-03-05T10:00:00Z"), expected);
/// assert_eq!(parse_date("not a date"), None);
/// ```
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| parse_timestamp(text).map(|ts| ts.date_naive()))
}

/// Parses a JSON cell as a date: strings permissively, numbers as
/// spreadsheet serial days (1899-12-30 epoch).
pub fn parse_date_value(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n.as_f64().and_then(|serial| from_serial(serial as i64)),
        _ => None,
    }
}

fn from_serial(days: i64) -> Option<NaiveDate> {
    if !(1..=MAX_SERIAL_DAY).contains(&days) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(days))
}

/// Parses a timestamp string.
///
/// RFC 3339 values keep their offset (converted to UTC); zone-less values
/// and plain dates are read as UTC, dates at midnight.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(text) {
        return Some(ts.with_timezone(&Utc));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns the Monday of the ISO week containing `date`.
///
/// `None` when that Monday falls before the earliest representable date.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(i64::from(
        date.weekday().num_days_from_monday(),
    )))
}

/// Returns the English month name of a date, e.g. "January".
pub fn month_name(date: NaiveDate) -> &'static str {
    Month::try_from(date.month() as u8)
        .map(|m| m.name())
        .unwrap_or_default()
}
