//! Per-employee absence summary model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AbsenceType, Authorization};

/// The fixed category set summaries count by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SummaryCategory {
    /// Sick days.
    Sick,
    /// Paid time off.
    Pto,
    /// Holidays.
    Holiday,
    /// No show / no call.
    NoShow,
    /// Emergency leave.
    Emergency,
    /// Funeral leave.
    Funeral,
    /// Everything else, including offboarding.
    Other,
}

impl From<AbsenceType> for SummaryCategory {
    fn from(absence_type: AbsenceType) -> Self {
        match absence_type {
            AbsenceType::Sick => SummaryCategory::Sick,
            AbsenceType::Pto => SummaryCategory::Pto,
            AbsenceType::Holiday => SummaryCategory::Holiday,
            AbsenceType::NoShowNoCall => SummaryCategory::NoShow,
            AbsenceType::Emergency => SummaryCategory::Emergency,
            AbsenceType::Funeral => SummaryCategory::Funeral,
            AbsenceType::Offboarded | AbsenceType::Other => SummaryCategory::Other,
        }
    }
}

/// Absence counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCounts {
    /// Sick days.
    pub sick: u32,
    /// Paid time off.
    pub pto: u32,
    /// Holidays.
    pub holiday: u32,
    /// No show / no call.
    pub no_show: u32,
    /// Emergency leave.
    pub emergency: u32,
    /// Funeral leave.
    pub funeral: u32,
    /// Everything else.
    pub other: u32,
}

impl TypeCounts {
    /// Adds one to the given category.
    pub fn increment(&mut self, category: SummaryCategory) {
        let slot = match category {
            SummaryCategory::Sick => &mut self.sick,
            SummaryCategory::Pto => &mut self.pto,
            SummaryCategory::Holiday => &mut self.holiday,
            SummaryCategory::NoShow => &mut self.no_show,
            SummaryCategory::Emergency => &mut self.emergency,
            SummaryCategory::Funeral => &mut self.funeral,
            SummaryCategory::Other => &mut self.other,
        };
        *slot += 1;
    }

    /// Sum over all categories.
    pub fn total(&self) -> u32 {
        self.sick + self.pto + self.holiday + self.no_show + self.emergency + self.funeral + self.other
    }
}

/// One entry of an employee's recent-absence list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAbsence {
    /// Date of the absence, when known.
    pub date: Option<NaiveDate>,
    /// Status or reason text.
    pub status: String,
    /// Counted category.
    pub category: SummaryCategory,
    /// Authorization status.
    pub authorization: Authorization,
}

/// Absence statistics for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    /// The employee name the summary is keyed by.
    pub employee_name: String,
    /// Number of absences counted.
    pub total_absences: u32,
    /// Absences known to be authorized.
    pub authorized_count: u32,
    /// Absences known to be unauthorized.
    pub unauthorized_count: u32,
    /// Counts per category; always sums to `total_absences`.
    pub by_type: TypeCounts,
    /// Most recent absences, newest first.
    pub recent: Vec<RecentAbsence>,
}

impl EmployeeSummary {
    /// Creates an empty summary for an employee.
    pub fn new(employee_name: impl Into<String>) -> Self {
        Self {
            employee_name: employee_name.into(),
            total_absences: 0,
            authorized_count: 0,
            unauthorized_count: 0,
            by_type: TypeCounts::default(),
            recent: Vec::new(),
        }
    }
}
