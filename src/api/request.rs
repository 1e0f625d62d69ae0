//! Request types for the Absence Engine API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{AbsenceEvent, NormalizedRecord, RawRow};

/// Request body for `POST /absences/grid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridRequest {
    /// The sheet as rows of cells. Cells may be strings, numbers or null.
    pub rows: Vec<Vec<Value>>,
    /// Year to stamp on events; the configured year source when absent.
    #[serde(default)]
    pub year: Option<i32>,
}

/// Request body for `POST /absences/records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsRequest {
    /// Leave-tracker rows, as objects or arrays.
    pub rows: Vec<RawRow>,
}

/// Request body for `POST /absences/summary`.
///
/// Events and records may be mixed; both feed the same summaries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Grid events to summarize.
    #[serde(default)]
    pub events: Vec<AbsenceEvent>,
    /// Normalized records to summarize.
    #[serde(default)]
    pub records: Vec<NormalizedRecord>,
    /// Overrides the configured recent-list size.
    #[serde(default)]
    pub recent_limit: Option<usize>,
}
