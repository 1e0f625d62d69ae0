//! Leave record validation.
//!
//! Validation never fails: problems are collected as human-readable strings
//! next to a cleaned copy of the record.

use serde::{Deserialize, Serialize};

use crate::models::NormalizedRecord;

use super::dates::parse_date;

/// The outcome of validating one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when no check failed.
    pub valid: bool,
    /// One message per failed check.
    pub errors: Vec<String>,
    /// The record after silent corrections.
    pub cleaned: NormalizedRecord,
}

/// Validates a record.
///
/// Checks, each adding one error when it fails:
/// - absentee name, start date and end date are present
/// - each present date parses to a calendar date
/// - the start date is not after the end date
/// - neither day count is negative
///
/// A business-day count above the calendar-day count is clamped in the
/// cleaned copy and does not count as an error.
///
/// # Example
///
/// ```
/// use absence_engine::config::FieldPlan;
/// use absence_engine::models::RawRow;
/// use absence_engine::processing::{validate_record, Normalizer};
/// use serde_json::json;
///
/// let plan = FieldPlan::default();
/// let record = Normalizer::new(&plan)
///     .normalize_row(0, &RawRow(json!({
///         "nameOfAbsentee": "A",
///         "startDate": "2024-01-05",
///         "endDate": "2024-01-02",
///     })))
///     .unwrap();
///
/// let result = validate_record(&record);
/// assert!(!result.valid);
/// assert!(result.errors[0].contains("after"));
/// ```
pub fn validate_record(record: &NormalizedRecord) -> ValidationResult {
    let mut errors = Vec::new();
    let mut cleaned = record.clone();

    if record.name_of_absentee.trim().is_empty() {
        errors.push("nameOfAbsentee is required".to_string());
    }

    let start = check_date("startDate", &record.start_date, &mut errors);
    let end = check_date("endDate", &record.end_date, &mut errors);

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            errors.push(format!(
                "startDate {} is after endDate {}",
                record.start_date, record.end_date
            ));
        }
    }

    if record.no_of_days < 0 {
        errors.push(format!("noOfDays must not be negative (got {})", record.no_of_days));
    }
    if record.no_of_days_no_wknd < 0 {
        errors.push(format!(
            "noOfDaysNoWknd must not be negative (got {})",
            record.no_of_days_no_wknd
        ));
    }

    if cleaned.no_of_days_no_wknd > cleaned.no_of_days {
        cleaned.no_of_days_no_wknd = cleaned.no_of_days;
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
        cleaned,
    }
}

fn check_date(name: &str, value: &str, errors: &mut Vec<String>) -> Option<chrono::NaiveDate> {
    if value.trim().is_empty() {
        errors.push(format!("{} is required", name));
        return None;
    }
    let date = parse_date(value);
    if date.is_none() {
        errors.push(format!("{} '{}' is not a valid date", name, value));
    }
    date
}
