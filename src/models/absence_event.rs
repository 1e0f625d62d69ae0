//! Absence event model and its classification enums.
//!
//! An [`AbsenceEvent`] is one (employee, day) cell lifted out of an
//! attendance grid. Events are produced by the grid parser and never mutated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The classified kind of an absence.
///
/// Serialized with the labels used on the attendance sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbsenceType {
    /// Sick day.
    #[serde(rename = "Sick")]
    Sick,
    /// Paid time off or other approved leave.
    #[serde(rename = "PTO")]
    Pto,
    /// Holiday.
    #[serde(rename = "Holiday")]
    Holiday,
    /// Did not show up and did not call in.
    #[serde(rename = "No Show/No Call")]
    NoShowNoCall,
    /// The employee has been offboarded.
    #[serde(rename = "Offboarded")]
    Offboarded,
    /// Emergency leave.
    #[serde(rename = "Emergency")]
    Emergency,
    /// Bereavement leave.
    #[serde(rename = "Funeral")]
    Funeral,
    /// Any status no rule recognizes.
    #[serde(rename = "Other")]
    Other,
}

impl std::fmt::Display for AbsenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AbsenceType::Sick => "Sick",
            AbsenceType::Pto => "PTO",
            AbsenceType::Holiday => "Holiday",
            AbsenceType::NoShowNoCall => "No Show/No Call",
            AbsenceType::Offboarded => "Offboarded",
            AbsenceType::Emergency => "Emergency",
            AbsenceType::Funeral => "Funeral",
            AbsenceType::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

/// Whether an absence was authorized.
///
/// This is a genuine tri-state: a status the rules cannot judge is
/// [`Authorization::Unknown`], never silently "not authorized".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Authorization {
    /// Known to be authorized.
    Authorized,
    /// Known to be unauthorized.
    Unauthorized,
    /// Not determinable from the source data.
    #[default]
    Unknown,
}

impl Authorization {
    /// Returns the canonical yes/no label, or `None` when unknown.
    ///
    /// ```
    /// use absence_engine::models::Authorization;
    ///
    /// assert_eq!(Authorization::Authorized.as_yes_no(), Some("Yes"));
    /// assert_eq!(Authorization::Unauthorized.as_yes_no(), Some("No"));
    /// assert_eq!(Authorization::Unknown.as_yes_no(), None);
    /// ```
    pub fn as_yes_no(&self) -> Option<&'static str> {
        match self {
            Authorization::Authorized => Some("Yes"),
            Authorization::Unauthorized => Some("No"),
            Authorization::Unknown => None,
        }
    }
}

/// A single absence lifted from an attendance grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceEvent {
    /// The employee name from column 0 of the data row, trimmed.
    pub employee_name: String,
    /// The calendar date of the absence.
    pub date: NaiveDate,
    /// The month name, e.g. "January".
    pub month: String,
    /// Day of month (1-31).
    pub day: u32,
    /// The year the event was stamped with.
    pub year: i32,
    /// The cell text as it appeared on the sheet (trimmed).
    pub status: String,
    /// The classified kind of absence.
    #[serde(rename = "type")]
    pub absence_type: AbsenceType,
    /// Whether the absence was authorized.
    pub authorization: Authorization,
}
