//! Core data models for the Absence Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod absence_event;
mod employee_summary;
mod normalized_record;
mod raw_row;

pub use absence_event::{AbsenceEvent, AbsenceType, Authorization};
pub use employee_summary::{EmployeeSummary, RecentAbsence, SummaryCategory, TypeCounts};
pub use normalized_record::{NormalizedRecord, SOURCE_SYSTEM};
pub use raw_row::{JsonValueExt, RawRow};
