//! The leave-record pipeline: normalize, validate, deduplicate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::FieldPlan;
use crate::models::{NormalizedRecord, RawRow};

use super::dedup::deduplicate;
use super::normalizer::Normalizer;
use super::validator::validate_record;

/// A record excluded for failing validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRecord {
    /// Id of the rejected record.
    pub id: String,
    /// Absentee name, possibly blank.
    pub name_of_absentee: String,
    /// The validation messages.
    pub errors: Vec<String>,
}

/// The output of [`process_records`].
#[derive(Debug, Clone, Default)]
pub struct RecordBatch {
    /// Valid, cleaned, deduplicated records.
    pub records: Vec<NormalizedRecord>,
    /// Records that failed validation.
    pub rejected: Vec<RejectedRecord>,
    /// Rows that could not be normalized at all.
    pub dropped_rows: usize,
}

/// Runs raw leave rows through the whole pipeline.
///
/// Rows that cannot be extracted are dropped, records that fail validation
/// are set aside with their messages, and the rest are cleaned and
/// deduplicated.
///
/// # Example
///
/// ```
/// use absence_engine::config::FieldPlan;
/// use absence_engine::models::RawRow;
/// use absence_engine::processing::process_records;
/// use chrono::Utc;
/// use serde_json::json;
///
/// let rows = vec![
///     RawRow(json!({"nameOfAbsentee": "A", "startDate": "2024-01-01", "endDate": "2024-01-02"})),
///     RawRow(json!({"nameOfAbsentee": "B", "startDate": "2024-01-05", "endDate": "2024-01-02"})),
///     RawRow(json!("not a row")),
/// ];
/// let batch = process_records(&rows, &FieldPlan::default(), Utc::now());
///
/// assert_eq!(batch.records.len(), 1);
/// assert_eq!(batch.rejected.len(), 1);
/// assert_eq!(batch.dropped_rows, 1);
/// ```
pub fn process_records(rows: &[RawRow], plan: &FieldPlan, synced_at: DateTime<Utc>) -> RecordBatch {
    let outcome = Normalizer::with_sync_time(plan, synced_at).normalize(rows);

    let mut cleaned = Vec::with_capacity(outcome.records.len());
    let mut rejected = Vec::new();
    for record in outcome.records {
        let result = validate_record(&record);
        if result.valid {
            cleaned.push(result.cleaned);
        } else {
            warn!(
                record_id = %record.id,
                name = %record.name_of_absentee,
                errors = %result.errors.join("; "),
                "Excluding invalid record"
            );
            rejected.push(RejectedRecord {
                id: record.id,
                name_of_absentee: record.name_of_absentee,
                errors: result.errors,
            });
        }
    }

    let records = deduplicate(cleaned);
    debug!(
        records = records.len(),
        rejected = rejected.len(),
        dropped = outcome.dropped_rows,
        "Processed leave rows"
    );

    RecordBatch {
        records,
        rejected,
        dropped_rows: outcome.dropped_rows,
    }
}
