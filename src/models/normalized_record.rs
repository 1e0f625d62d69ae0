//! Normalized leave record model.
//!
//! A [`NormalizedRecord`] is the canonical shape every leave-tracker row is
//! mapped into, whatever columns or headers the source sheet used.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Authorization;

/// The source-system identifier stamped on every normalized record.
pub const SOURCE_SYSTEM: &str = "csp";

/// A leave record in canonical form.
///
/// Dates are kept as `YYYY-MM-DD` strings (empty when the source value did
/// not parse) because records are also read back from JSON files written by
/// earlier syncs, and the validator must be able to report unparseable dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    /// Record identifier, generated when the source has none.
    pub id: String,
    /// Monday of the week containing the absence.
    #[serde(default)]
    pub week_start_date: String,
    /// First day of the absence.
    #[serde(default)]
    pub start_date: String,
    /// Last day of the absence.
    #[serde(default)]
    pub end_date: String,
    /// Calendar days covered.
    #[serde(default)]
    pub no_of_days: i64,
    /// Business days covered; never more than `no_of_days` once validated.
    #[serde(default)]
    pub no_of_days_no_wknd: i64,
    /// The absent employee.
    #[serde(default)]
    pub name_of_absentee: String,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
    /// Authorization status, written as "Yes", "No" or "".
    #[serde(default, with = "yes_no")]
    pub authorized: Authorization,
    /// Whether the leave form was sent.
    #[serde(default)]
    pub leave_form_sent: bool,
    /// Free-text comment.
    #[serde(default)]
    pub comment: String,
    /// Client the absentee is assigned to.
    #[serde(default)]
    pub client: String,
    /// Source-system identifier.
    #[serde(default = "default_source")]
    pub source: String,
    /// Country of the absentee.
    #[serde(default)]
    pub country: String,
    /// ISO week number of the start date.
    #[serde(default)]
    pub week_number: u32,
    /// Month name of the start date.
    #[serde(default)]
    pub month: String,
    /// Year of the absence.
    #[serde(default)]
    pub year: i32,
    /// When the underlying event was recorded at the source.
    #[serde(default)]
    pub time_stamp: Option<DateTime<Utc>>,
    /// When this record was produced by a sync.
    pub synced_at: DateTime<Utc>,
    /// Where the record came from, e.g. "leave-tracker-sheet".
    #[serde(default)]
    pub provenance: String,
}

fn default_source() -> String {
    SOURCE_SYSTEM.to_string()
}

impl NormalizedRecord {
    /// Returns the identity key used for deduplication.
    pub fn identity_key(&self) -> (&str, &str, &str) {
        (&self.name_of_absentee, &self.start_date, &self.end_date)
    }

    /// Returns the timestamp that decides which duplicate is newest.
    ///
    /// The event timestamp wins; the sync timestamp stands in when the
    /// source carried none. This is not the later of the two:
    /// every record of one batch shares `synced_at`, which is usually later
    /// than any event timestamp, so taking the maximum would make all
    /// duplicates tie and keep the oldest edit instead of the newest.
    pub fn effective_timestamp(&self) -> DateTime<Utc> {
        self.time_stamp.unwrap_or(self.synced_at)
    }
}

/// Serde adapter writing [`Authorization`] as the canonical "Yes"/"No" string.
mod yes_no {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::models::{Authorization, JsonValueExt};
    use crate::processing::parse_authorization;

    pub fn serialize<S: Serializer>(value: &Authorization, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_yes_no().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Authorization, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(parse_authorization(value.as_text().as_deref()))
    }
}
