//! Leave record normalization.
//!
//! Maps loosely-shaped rows into [`NormalizedRecord`]s using a
//! [`FieldPlan`]: for every field the plan lists where to look, in priority
//! order, and the first source holding a non-blank value wins. Fields no
//! source provides fall back to a default.
//!
//! Normalization is best-effort per row. A row that cannot be read is
//! logged and dropped, and the rest of the batch is still processed.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{Field, FieldPlan, FieldSource};
use crate::error::{EngineError, EngineResult};
use crate::models::{Authorization, JsonValueExt, NormalizedRecord, RawRow, SOURCE_SYSTEM};

use super::dates::{format_date, month_name, parse_date_value, parse_timestamp, week_start};
use super::text::parse_leading_int;

/// Default for client and country when no source provides one.
pub const UNKNOWN: &str = "Unknown";

/// Returns true for affirmative flag text: anything containing "yes", or
/// exactly "true" (both case-insensitive). Absent text is negative.
///
/// ```
/// use absence_engine::processing::parse_flag;
///
/// assert!(parse_flag(Some("Yes - emailed")));
/// assert!(parse_flag(Some("TRUE")));
/// assert!(!parse_flag(Some("no")));
/// assert!(!parse_flag(None));
/// ```
pub fn parse_flag(text: Option<&str>) -> bool {
    text.map(|t| {
        let t = t.trim().to_lowercase();
        t.contains("yes") || t == "true"
    })
    .unwrap_or(false)
}

/// Reads an authorization column: blank is unspecified, affirmative text
/// (see [`parse_flag`]) is authorized, anything else is not authorized.
pub fn parse_authorization(text: Option<&str>) -> Authorization {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        None => Authorization::Unknown,
        Some(t) if parse_flag(Some(t)) => Authorization::Authorized,
        Some(_) => Authorization::Unauthorized,
    }
}

/// The records a batch produced and how many rows were dropped.
#[derive(Debug, Clone, Default)]
pub struct NormalizeOutcome {
    /// Records, in input order.
    pub records: Vec<NormalizedRecord>,
    /// Rows that failed extraction.
    pub dropped_rows: usize,
}

/// Builds [`NormalizedRecord`]s from raw rows.
#[derive(Debug, Clone)]
pub struct Normalizer<'a> {
    plan: &'a FieldPlan,
    synced_at: DateTime<Utc>,
}

impl<'a> Normalizer<'a> {
    /// Creates a normalizer stamping records with the current time.
    pub fn new(plan: &'a FieldPlan) -> Self {
        Self::with_sync_time(plan, Utc::now())
    }

    /// Creates a normalizer with an explicit sync time.
    pub fn with_sync_time(plan: &'a FieldPlan, synced_at: DateTime<Utc>) -> Self {
        Self { plan, synced_at }
    }

    /// Normalizes a batch of rows. Never fails; bad rows are dropped.
    pub fn normalize(&self, rows: &[RawRow]) -> NormalizeOutcome {
        let mut outcome = NormalizeOutcome::default();

        for (index, row) in rows.iter().enumerate() {
            match self.normalize_row(index, row) {
                Ok(record) => outcome.records.push(record),
                Err(error) => {
                    warn!(row = index, error = %error, "Dropping row that could not be normalized");
                    outcome.dropped_rows += 1;
                }
            }
        }

        debug!(
            rows = rows.len(),
            records = outcome.records.len(),
            dropped = outcome.dropped_rows,
            provenance = %self.plan.provenance,
            "Normalized leave rows"
        );
        outcome
    }

    /// Normalizes a single row.
    pub fn normalize_row(&self, index: usize, row: &RawRow) -> EngineResult<NormalizedRecord> {
        if !row.is_addressable() {
            return Err(EngineError::RowExtraction {
                index,
                message: format!("expected an object or array, found {}", row.kind()),
            });
        }

        let fields = RowFields {
            plan: self.plan,
            row,
            index,
        };

        let start = fields.date(Field::StartDate)?;
        let end = fields.date(Field::EndDate)?;

        let week_start_date = fields
            .date(Field::WeekStartDate)?
            .or_else(|| start.and_then(week_start));
        let week_number = fields
            .integer(Field::WeekNumber)?
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .or_else(|| start.map(|d| d.iso_week().week()))
            .unwrap_or(0);
        let month = fields
            .text(Field::Month)?
            .or_else(|| start.map(|d| month_name(d).to_string()))
            .unwrap_or_default();
        let year = fields
            .integer(Field::Year)?
            .and_then(|y| i32::try_from(y).ok())
            .or_else(|| start.map(|d| d.year()))
            .unwrap_or_else(|| self.synced_at.year());

        Ok(NormalizedRecord {
            id: fields
                .text(Field::Id)?
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            week_start_date: week_start_date.map(format_date).unwrap_or_default(),
            start_date: start.map(format_date).unwrap_or_default(),
            end_date: end.map(format_date).unwrap_or_default(),
            no_of_days: fields.integer(Field::NoOfDays)?.unwrap_or(0),
            no_of_days_no_wknd: fields.integer(Field::NoOfDaysNoWknd)?.unwrap_or(0),
            name_of_absentee: fields.text(Field::NameOfAbsentee)?.unwrap_or_default(),
            reason: fields.text(Field::Reason)?.unwrap_or_default(),
            authorized: parse_authorization(fields.text(Field::Authorized)?.as_deref()),
            leave_form_sent: parse_flag(fields.text(Field::LeaveFormSent)?.as_deref()),
            comment: fields.text(Field::Comment)?.unwrap_or_default(),
            client: fields
                .text(Field::Client)?
                .unwrap_or_else(|| UNKNOWN.to_string()),
            source: SOURCE_SYSTEM.to_string(),
            country: fields
                .text(Field::Country)?
                .unwrap_or_else(|| UNKNOWN.to_string()),
            week_number,
            month,
            year,
            time_stamp: Some(fields.timestamp(Field::TimeStamp)?.unwrap_or(self.synced_at)),
            synced_at: self.synced_at,
            provenance: self.plan.provenance.clone(),
        })
    }
}

/// Typed field access on one row.
struct RowFields<'a> {
    plan: &'a FieldPlan,
    row: &'a RawRow,
    index: usize,
}

impl<'a> RowFields<'a> {
    /// The first present value among the field's sources.
    fn scalar(&self, field: Field) -> EngineResult<Option<&'a Value>> {
        let value = self
            .plan
            .sources(field)
            .iter()
            .find_map(|source| match source {
                FieldSource::Named(key) => self.row.named(key),
                FieldSource::Position(index) => self.row.positional(*index),
            });

        match value {
            Some(Value::Array(_)) | Some(Value::Object(_)) => Err(EngineError::RowExtraction {
                index: self.index,
                message: format!("field {:?} holds a nested value", field),
            }),
            other => Ok(other),
        }
    }

    fn text(&self, field: Field) -> EngineResult<Option<String>> {
        Ok(self
            .scalar(field)?
            .and_then(JsonValueExt::as_text)
            .map(|t| t.trim().to_string()))
    }

    fn integer(&self, field: Field) -> EngineResult<Option<i64>> {
        Ok(self.scalar(field)?.and_then(|value| match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
            Value::String(s) => parse_leading_int(s),
            _ => None,
        }))
    }

    fn date(&self, field: Field) -> EngineResult<Option<NaiveDate>> {
        let Some(value) = self.scalar(field)? else {
            return Ok(None);
        };
        let date = parse_date_value(value);
        if date.is_none() {
            debug!(row = self.index, field = ?field, value = %value, "Unparseable date left blank");
        }
        Ok(date)
    }

    fn timestamp(&self, field: Field) -> EngineResult<Option<DateTime<Utc>>> {
        Ok(self.scalar(field)?.and_then(|value| match value {
            Value::String(s) => parse_timestamp(s),
            Value::Number(_) => parse_date_value(value)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc()),
            _ => None,
        }))
    }
}
