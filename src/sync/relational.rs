//! Relational column mapping for leave records.
//!
//! Records are camelCase in JSON and snake_case in the `leave_records`
//! table. The mapping is spelled out column by column so that a renamed
//! struct field shows up as a failing test rather than a silently empty
//! column.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::models::NormalizedRecord;

/// Default target table.
pub const LEAVE_RECORDS_TABLE: &str = "leave_records";

/// (JSON field, table column) pairs, in insert order.
pub const COLUMN_MAP: &[(&str, &str)] = &[
    ("id", "id"),
    ("weekStartDate", "week_start_date"),
    ("startDate", "start_date"),
    ("endDate", "end_date"),
    ("noOfDays", "no_of_days"),
    ("noOfDaysNoWknd", "no_of_days_no_wknd"),
    ("nameOfAbsentee", "name_of_absentee"),
    ("reason", "reason"),
    ("authorized", "authorized"),
    ("leaveFormSent", "leave_form_sent"),
    ("comment", "comment"),
    ("client", "client"),
    ("source", "source"),
    ("country", "country"),
    ("weekNumber", "week_number"),
    ("month", "month"),
    ("year", "year"),
    ("timeStamp", "time_stamp"),
    ("syncedAt", "synced_at"),
    ("provenance", "provenance"),
];

/// One record as table column values, in [`COLUMN_MAP`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationalRow {
    values: Vec<Value>,
}

impl RelationalRow {
    /// Maps a record onto table columns.
    pub fn from_record(record: &NormalizedRecord) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_value(record)?;
        let values = COLUMN_MAP
            .iter()
            .map(|(field, _)| json.get(*field).cloned().unwrap_or(Value::Null))
            .collect();
        Ok(Self { values })
    }

    /// Returns the value for a column, if the column exists.
    pub fn get(&self, column: &str) -> Option<&Value> {
        COLUMN_MAP
            .iter()
            .position(|(_, c)| *c == column)
            .and_then(|i| self.values.get(i))
    }

    /// Returns the values in column order, ready to bind to [`insert_sql`].
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl Serialize for RelationalRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for ((_, column), value) in COLUMN_MAP.iter().zip(&self.values) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Maps a batch of records.
pub fn to_relational_rows(records: &[NormalizedRecord]) -> Result<Vec<RelationalRow>, serde_json::Error> {
    records.iter().map(RelationalRow::from_record).collect()
}

/// Builds a parameterized insert for one row, with `$n` placeholders in
/// [`COLUMN_MAP`] order.
///
/// ```
/// use absence_engine::sync::insert_sql;
///
/// let sql = insert_sql("leave_records");
/// assert!(sql.starts_with("INSERT INTO leave_records (id, week_start_date,"));
/// assert!(sql.ends_with("$19, $20)"));
/// ```
pub fn insert_sql(table: &str) -> String {
    let columns: Vec<&str> = COLUMN_MAP.iter().map(|(_, c)| *c).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        columns.join(", "),
        placeholders.join(", ")
    )
}
