//! Per-employee absence summaries.
//!
//! Summaries are rebuilt from scratch on every call. Both grid events and
//! normalized leave records can be summarized; each is first reduced to an
//! [`AbsenceFact`].

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{
    AbsenceEvent, Authorization, EmployeeSummary, NormalizedRecord, RecentAbsence, SummaryCategory,
};

use super::classification::classify_status;
use super::dates::parse_date;

/// The minimum an absence must carry to be summarized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsenceFact {
    /// Employee the absence belongs to.
    pub employee_name: String,
    /// Date of the absence, when known.
    pub date: Option<NaiveDate>,
    /// Status or reason text.
    pub status: String,
    /// Counted category.
    pub category: SummaryCategory,
    /// Authorization status.
    pub authorization: Authorization,
}

impl From<&AbsenceEvent> for AbsenceFact {
    fn from(event: &AbsenceEvent) -> Self {
        Self {
            employee_name: event.employee_name.clone(),
            date: Some(event.date),
            status: event.status.clone(),
            category: event.absence_type.into(),
            authorization: event.authorization,
        }
    }
}

impl From<&NormalizedRecord> for AbsenceFact {
    /// Records are dated by their start date and categorized by their reason.
    fn from(record: &NormalizedRecord) -> Self {
        Self {
            employee_name: record.name_of_absentee.clone(),
            date: parse_date(&record.start_date),
            status: record.reason.clone(),
            category: classify_status(&record.reason).into(),
            authorization: record.authorized,
        }
    }
}

/// Folds absences into one summary per employee.
///
/// Summaries come out in the order employees were first seen. Facts with a
/// blank employee name are skipped. Each employee's `recent` list holds at
/// most `recent_limit` entries: whenever it overflows it is sorted newest
/// first and truncated, and it is sorted once more at the end.
///
/// # Example
///
/// ```
/// use absence_engine::models::{AbsenceEvent, AbsenceType, Authorization};
/// use absence_engine::processing::{summarize, AbsenceFact};
/// use chrono::NaiveDate;
///
/// let event = AbsenceEvent {
///     employee_name: "Jane Doe".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     month: "January".to_string(),
///     day: 1,
///     year: 2025,
///     status: "Sick".to_string(),
///     absence_type: AbsenceType::Sick,
///     authorization: Authorization::Authorized,
/// };
///
/// let summaries = summarize([AbsenceFact::from(&event)], 10);
/// assert_eq!(summaries[0].total_absences, 1);
/// assert_eq!(summaries[0].by_type.sick, 1);
/// assert_eq!(summaries[0].authorized_count, 1);
/// ```
pub fn summarize<I>(facts: I, recent_limit: usize) -> Vec<EmployeeSummary>
where
    I: IntoIterator<Item = AbsenceFact>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut summaries: Vec<EmployeeSummary> = Vec::new();
    let mut skipped = 0usize;

    for fact in facts {
        let name = fact.employee_name.trim();
        if name.is_empty() {
            skipped += 1;
            continue;
        }

        let position = *index.entry(name.to_string()).or_insert_with(|| {
            summaries.push(EmployeeSummary::new(name));
            summaries.len() - 1
        });
        let summary = &mut summaries[position];

        summary.total_absences += 1;
        summary.by_type.increment(fact.category);
        match fact.authorization {
            Authorization::Authorized => summary.authorized_count += 1,
            Authorization::Unauthorized => summary.unauthorized_count += 1,
            Authorization::Unknown => {}
        }

        summary.recent.push(RecentAbsence {
            date: fact.date,
            status: fact.status,
            category: fact.category,
            authorization: fact.authorization,
        });
        if summary.recent.len() > recent_limit {
            sort_newest_first(&mut summary.recent);
            summary.recent.truncate(recent_limit);
        }
    }

    for summary in &mut summaries {
        sort_newest_first(&mut summary.recent);
    }

    debug!(
        employees = summaries.len(),
        skipped_blank_names = skipped,
        "Built absence summaries"
    );
    summaries
}

/// Summarizes grid events.
pub fn summarize_events(events: &[AbsenceEvent], recent_limit: usize) -> Vec<EmployeeSummary> {
    summarize(events.iter().map(AbsenceFact::from), recent_limit)
}

/// Summarizes normalized leave records.
pub fn summarize_records(records: &[NormalizedRecord], recent_limit: usize) -> Vec<EmployeeSummary> {
    summarize(records.iter().map(AbsenceFact::from), recent_limit)
}

/// Undated entries sort last.
fn sort_newest_first(recent: &mut [RecentAbsence]) {
    recent.sort_by(|a, b| b.date.cmp(&a.date));
}
