//! Record deduplication.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::models::NormalizedRecord;

/// Keeps the newest record per identity key (absentee name, start date,
/// end date).
///
/// The output holds one record per key, at the position where the key was
/// first seen. Its content is the record with the latest
/// [`effective_timestamp`](NormalizedRecord::effective_timestamp); on a tie
/// the earlier record is kept.
///
/// # Example
///
/// ```
/// use absence_engine::config::FieldPlan;
/// use absence_engine::models::RawRow;
/// use absence_engine::processing::{deduplicate, Normalizer};
/// use serde_json::json;
///
/// let plan = FieldPlan::default();
/// let rows = vec![
///     RawRow(json!({"nameOfAbsentee": "A", "startDate": "2024-01-01", "endDate": "2024-01-02",
///                   "timeStamp": "2024-01-01T00:00:00Z", "comment": "first"})),
///     RawRow(json!({"nameOfAbsentee": "A", "startDate": "2024-01-01", "endDate": "2024-01-02",
///                   "timeStamp": "2024-01-05T00:00:00Z", "comment": "second"})),
/// ];
/// let records = Normalizer::new(&plan).normalize(&rows).records;
///
/// let deduped = deduplicate(records);
/// assert_eq!(deduped.len(), 1);
/// assert_eq!(deduped[0].comment, "second");
/// ```
pub fn deduplicate(records: Vec<NormalizedRecord>) -> Vec<NormalizedRecord> {
    let input_len = records.len();
    let mut positions: HashMap<(String, String, String), usize> = HashMap::new();
    let mut kept: Vec<NormalizedRecord> = Vec::with_capacity(input_len);

    for record in records {
        let (name, start, end) = record.identity_key();
        let key = (name.to_string(), start.to_string(), end.to_string());

        match positions.entry(key) {
            Entry::Occupied(slot) => {
                let existing = &mut kept[*slot.get()];
                if record.effective_timestamp() > existing.effective_timestamp() {
                    *existing = record;
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(kept.len());
                kept.push(record);
            }
        }
    }

    debug!(
        input = input_len,
        output = kept.len(),
        duplicates = input_len - kept.len(),
        "Deduplicated leave records"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Authorization, SOURCE_SYSTEM};
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    fn record(name: &str, start: &str, end: &str, stamp: Option<DateTime<Utc>>, comment: &str) -> NormalizedRecord {
        NormalizedRecord {
            id: format!("{}-{}", name, comment),
            week_start_date: String::new(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            no_of_days: 1,
            no_of_days_no_wknd: 1,
            name_of_absentee: name.to_string(),
            reason: String::new(),
            authorized: Authorization::Unknown,
            leave_form_sent: false,
            comment: comment.to_string(),
            client: "Unknown".to_string(),
            source: SOURCE_SYSTEM.to_string(),
            country: "Unknown".to_string(),
            week_number: 0,
            month: String::new(),
            year: 2024,
            time_stamp: stamp,
            synced_at: ts(10),
            provenance: String::new(),
        }
    }

    #[test]
    fn test_later_duplicate_replaces_content() {
        let records = vec![
            record("A", "2024-01-01", "2024-01-02", Some(ts(1)), "old"),
            record("A", "2024-01-01", "2024-01-02", Some(ts(5)), "new"),
        ];
        let deduped = deduplicate(records);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].comment, "new");
        assert_eq!(deduped[0].time_stamp, Some(ts(5)));
    }

    #[test]
    fn test_older_duplicate_does_not_replace() {
        let records = vec![
            record("A", "2024-01-01", "2024-01-02", Some(ts(5)), "new"),
            record("A", "2024-01-01", "2024-01-02", Some(ts(1)), "old"),
        ];
        let deduped = deduplicate(records);
        assert_eq!(deduped[0].comment, "new");
    }

    #[test]
    fn test_replacement_keeps_first_seen_position() {
        let records = vec![
            record("A", "2024-01-01", "2024-01-02", Some(ts(1)), "a-old"),
            record("B", "2024-01-01", "2024-01-02", Some(ts(1)), "b"),
            record("A", "2024-01-01", "2024-01-02", Some(ts(3)), "a-new"),
            record("C", "2024-01-03", "2024-01-03", Some(ts(1)), "c"),
        ];
        let comments: Vec<_> = deduplicate(records)
            .into_iter()
            .map(|r| r.comment)
            .collect();
        assert_eq!(comments, vec!["a-new", "b", "c"]);
    }

    #[test]
    fn test_different_dates_are_different_keys() {
        let records = vec![
            record("A", "2024-01-01", "2024-01-02", Some(ts(1)), "x"),
            record("A", "2024-01-01", "2024-01-03", Some(ts(1)), "y"),
        ];
        assert_eq!(deduplicate(records).len(), 2);
    }

    #[test]
    fn test_missing_timestamp_uses_sync_time() {
        // synced_at is day 10, later than the explicit day-5 stamp.
        let records = vec![
            record("A", "2024-01-01", "2024-01-02", Some(ts(5)), "stamped"),
            record("A", "2024-01-01", "2024-01-02", None, "unstamped"),
        ];
        assert_eq!(deduplicate(records)[0].comment, "unstamped");
    }

    #[test]
    fn test_tie_keeps_earlier_record() {
        let records = vec![
            record("A", "2024-01-01", "2024-01-02", Some(ts(2)), "first"),
            record("A", "2024-01-01", "2024-01-02", Some(ts(2)), "second"),
        ];
        assert_eq!(deduplicate(records)[0].comment, "first");
    }

    #[test]
    fn test_records_sharing_identity_key_collapse() {
        let mut first = record("A", "2024-01-01", "2024-01-02", Some(ts(1)), "first");
        first.client = "Acme".to_string();
        first.reason = "Sick".to_string();
        let mut second = record("A", "2024-01-01", "2024-01-02", Some(ts(2)), "second");
        second.client = "Initech".to_string();
        second.reason = "PTO".to_string();
        assert_eq!(first.identity_key(), second.identity_key());

        let deduped = deduplicate(vec![first, second]);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].client, "Initech");
    }

    #[test]
    fn test_empty_input() {
        assert!(deduplicate(Vec::new()).is_empty());
    }
}
