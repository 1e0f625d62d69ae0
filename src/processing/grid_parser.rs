//! Attendance grid parsing.
//!
//! An attendance sheet is a stack of month blocks:
//!
//! ```text
//! JANUARY
//!            1         2          3
//! Jane Doe   Sick      Attended   PTO
//! John Roe   Attended  No Show    Attended
//! <blank row, next month name, or a legend keyword ends the block>
//! ```
//!
//! The scan is a single forward pass driven by a two-state machine
//! ([`ScanState`]). Each row is first classified ([`RowKind`]) and then fed
//! to a pure transition function, so the block-termination rules can be
//! tested one at a time.

use std::collections::HashSet;

use chrono::{Datelike, Local, Month, NaiveDate};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ParserConfig, YearSource};
use crate::models::{AbsenceEvent, JsonValueExt};

use super::classification::{classify_status, infer_authorization};
use super::text::parse_leading_int;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Cell text that marks an attended day.
const ATTENDED: &str = "attended";

/// Returns the month named by a cell, matching full English names only.
///
/// ```
/// use absence_engine::processing::month_from_label;
/// use chrono::Month;
///
/// assert_eq!(month_from_label(" march "), Some(Month::March));
/// assert_eq!(month_from_label("MAR"), None);
/// ```
pub fn month_from_label(label: &str) -> Option<Month> {
    let label = label.trim().to_uppercase();
    MONTHS
        .iter()
        .copied()
        .find(|m| m.name().to_uppercase() == label)
}

/// A header column holding a valid day of month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayColumn {
    /// Index of the column in every row of the block.
    pub column: usize,
    /// Day of month (1-31).
    pub day: u32,
}

/// What column 0 of a row says about the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Column 0 is missing or blank.
    Blank,
    /// Column 0 names a month.
    MonthName(Month),
    /// Column 0 is a legend keyword.
    Legend,
    /// Anything else: an employee row (or a header row, by position).
    Data,
}

/// Grid scanner state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for the next month-name row.
    SeekingBlock,
    /// Inside a month block. `day_columns` is `None` until the header row
    /// following the month name has been read.
    InBlock {
        /// The block's month.
        month: Month,
        /// Day columns from the header row.
        day_columns: Option<Vec<DayColumn>>,
    },
}

/// Extracts [`AbsenceEvent`]s from an attendance grid.
///
/// # Example
///
/// ```
/// use absence_engine::config::{ParserConfig, YearSource};
/// use absence_engine::models::{AbsenceType, Authorization};
/// use absence_engine::processing::GridParser;
///
/// let rows = vec![
///     vec!["JANUARY".to_string()],
///     vec!["".to_string(), "1".to_string(), "2".to_string(), "3".to_string()],
///     vec![
///         "Jane Doe".to_string(),
///         "Sick".to_string(),
///         "Attended".to_string(),
///         "PTO".to_string(),
///     ],
/// ];
///
/// let parser = GridParser::new(&ParserConfig::default()).with_year(YearSource::Fixed(2025));
/// let events = parser.parse(&rows);
///
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[0].day, 1);
/// assert_eq!(events[0].absence_type, AbsenceType::Sick);
/// assert_eq!(events[1].day, 3);
/// assert_eq!(events[1].authorization, Authorization::Authorized);
/// ```
#[derive(Debug, Clone)]
pub struct GridParser {
    year: i32,
    legend_keywords: HashSet<String>,
}

impl GridParser {
    /// Creates a parser from configuration.
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            year: resolve_year(config.year_source()),
            legend_keywords: config
                .legend_keywords
                .iter()
                .map(|k| k.trim().to_uppercase())
                .collect(),
        }
    }

    /// Overrides the year events are stamped with.
    pub fn with_year(mut self, year: YearSource) -> Self {
        self.year = resolve_year(year);
        self
    }

    /// Returns the year events are stamped with.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Parses a grid of cell strings.
    pub fn parse(&self, rows: &[Vec<String>]) -> Vec<AbsenceEvent> {
        let mut state = ScanState::SeekingBlock;
        let mut events = Vec::new();

        for row in rows {
            let (next, emitted) = self.transition(state, row);
            events.extend(emitted);
            state = next;
        }

        debug!(rows = rows.len(), events = events.len(), year = self.year, "Parsed attendance grid");
        events
    }

    /// Parses a grid of JSON cells; scalars are rendered as text, anything
    /// else reads as a blank cell.
    pub fn parse_values(&self, rows: &[Vec<Value>]) -> Vec<AbsenceEvent> {
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_text().unwrap_or_default())
                    .collect()
            })
            .collect();
        self.parse(&rows)
    }

    /// Classifies a row by its column 0.
    pub fn classify_row(&self, row: &[String]) -> RowKind {
        let first = row.first().map(|c| c.trim()).unwrap_or("");
        if first.is_empty() {
            return RowKind::Blank;
        }
        if let Some(month) = month_from_label(first) {
            return RowKind::MonthName(month);
        }
        if self.legend_keywords.contains(&first.to_uppercase()) {
            return RowKind::Legend;
        }
        RowKind::Data
    }

    /// Advances the scan by one row, returning the next state and the
    /// events the row produced.
    pub fn transition(&self, state: ScanState, row: &[String]) -> (ScanState, Vec<AbsenceEvent>) {
        match state {
            ScanState::SeekingBlock => match self.classify_row(row) {
                RowKind::MonthName(month) => (
                    ScanState::InBlock {
                        month,
                        day_columns: None,
                    },
                    Vec::new(),
                ),
                _ => (ScanState::SeekingBlock, Vec::new()),
            },
            ScanState::InBlock {
                month,
                day_columns: None,
            } => {
                let day_columns = parse_header(row);
                if day_columns.is_empty() {
                    debug!(month = month.name(), "Month block has no day columns");
                }
                (
                    ScanState::InBlock {
                        month,
                        day_columns: Some(day_columns),
                    },
                    Vec::new(),
                )
            }
            ScanState::InBlock {
                month,
                day_columns: Some(day_columns),
            } => match self.classify_row(row) {
                RowKind::Blank | RowKind::Legend => (ScanState::SeekingBlock, Vec::new()),
                RowKind::MonthName(next_month) => (
                    ScanState::InBlock {
                        month: next_month,
                        day_columns: None,
                    },
                    Vec::new(),
                ),
                RowKind::Data => {
                    let events = self.row_events(month, &day_columns, row);
                    (
                        ScanState::InBlock {
                            month,
                            day_columns: Some(day_columns),
                        },
                        events,
                    )
                }
            },
        }
    }

    fn row_events(&self, month: Month, day_columns: &[DayColumn], row: &[String]) -> Vec<AbsenceEvent> {
        let employee_name = row.first().map(|c| c.trim()).unwrap_or("");

        day_columns
            .iter()
            .filter_map(|column| {
                let cell = row.get(column.column).map(String::as_str).unwrap_or("");
                let status = cell.trim();
                if status.is_empty() || status.eq_ignore_ascii_case(ATTENDED) {
                    return None;
                }

                let Some(date) = NaiveDate::from_ymd_opt(self.year, month.number_from_month(), column.day)
                else {
                    warn!(
                        employee = employee_name,
                        month = month.name(),
                        day = column.day,
                        year = self.year,
                        "Skipping cell for a day that does not exist in this month"
                    );
                    return None;
                };

                Some(AbsenceEvent {
                    employee_name: employee_name.to_string(),
                    date,
                    month: month.name().to_string(),
                    day: column.day,
                    year: self.year,
                    status: cell.to_string(),
                    absence_type: classify_status(status),
                    authorization: infer_authorization(status),
                })
            })
            .collect()
    }
}

impl Default for GridParser {
    fn default() -> Self {
        Self::new(&ParserConfig::default())
    }
}

/// Reads day-of-month columns from a header row. Column 0 is skipped;
/// cells that are not integers in 1..=31 are ignored.
pub fn parse_header(row: &[String]) -> Vec<DayColumn> {
    row.iter()
        .enumerate()
        .skip(1)
        .filter_map(|(column, cell)| {
            let day = parse_leading_int(cell)?;
            (1..=31)
                .contains(&day)
                .then_some(DayColumn {
                    column,
                    day: day as u32,
                })
        })
        .collect()
}

fn resolve_year(source: YearSource) -> i32 {
    match source {
        YearSource::Current => Local::now().year(),
        YearSource::Fixed(year) => year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AbsenceType, Authorization};

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn parser() -> GridParser {
        GridParser::default().with_year(YearSource::Fixed(2025))
    }

    fn january_block() -> Vec<Vec<String>> {
        vec![
            row(&["JANUARY"]),
            row(&["", "1", "2", "3"]),
            row(&["Jane Doe", "Sick", "Attended", "PTO"]),
        ]
    }

    #[test]
    fn test_example_grid_yields_two_events() {
        let events = parser().parse(&january_block());

        assert_eq!(events.len(), 2);

        assert_eq!(events[0].employee_name, "Jane Doe");
        assert_eq!(events[0].day, 1);
        assert_eq!(events[0].status, "Sick");
        assert_eq!(events[0].absence_type, AbsenceType::Sick);
        assert_eq!(events[0].authorization, Authorization::Authorized);
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(events[0].month, "January");

        assert_eq!(events[1].day, 3);
        assert_eq!(events[1].status, "PTO");
        assert_eq!(events[1].absence_type, AbsenceType::Pto);
        assert_eq!(events[1].authorization, Authorization::Authorized);
    }

    #[test]
    fn test_attended_in_any_case_produces_no_event() {
        let rows = vec![
            row(&["MARCH"]),
            row(&["", "1", "2", "3"]),
            row(&["Jane Doe", "ATTENDED", "attended", " Attended "]),
        ];
        assert!(parser().parse(&rows).is_empty());
    }

    #[test]
    fn test_header_skips_non_numeric_and_out_of_range_cells() {
        let header = row(&["Name", "1", "Total", "0", "32", "31", ""]);
        assert_eq!(
            parse_header(&header),
            vec![
                DayColumn { column: 1, day: 1 },
                DayColumn { column: 5, day: 31 },
            ]
        );
    }

    #[test]
    fn test_block_without_day_columns_yields_nothing() {
        let rows = vec![
            row(&["FEBRUARY"]),
            row(&["", "Mon", "Tue"]),
            row(&["Jane Doe", "Sick", "Sick"]),
        ];
        assert!(parser().parse(&rows).is_empty());
    }

    #[test]
    fn test_blank_row_ends_block() {
        let rows = vec![
            row(&["JANUARY"]),
            row(&["", "1"]),
            row(&["Jane Doe", "Sick"]),
            row(&["", "Sick"]),
            row(&["John Roe", "Sick"]),
        ];
        let events = parser().parse(&rows);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].employee_name, "Jane Doe");
    }

    #[test]
    fn test_legend_keyword_ends_block() {
        let rows = vec![
            row(&["JANUARY"]),
            row(&["", "1"]),
            row(&["Jane Doe", "Sick"]),
            row(&["sick", "Sick"]),
            row(&["John Roe", "Sick"]),
        ];
        let events = parser().parse(&rows);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_legend_match_is_exact_not_substring() {
        let rows = vec![
            row(&["JANUARY"]),
            row(&["", "1"]),
            row(&["Sickler, Ann", "PTO"]),
        ];
        let events = parser().parse(&rows);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].employee_name, "Sickler, Ann");
    }

    #[test]
    fn test_month_name_starts_next_block() {
        let rows = vec![
            row(&["JANUARY"]),
            row(&["", "1"]),
            row(&["Jane Doe", "Sick"]),
            row(&["February"]),
            row(&["", "", "2"]),
            row(&["Jane Doe", "Sick", "Holiday"]),
        ];
        let events = parser().parse(&rows);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(events[1].date, NaiveDate::from_ymd_opt(2025, 2, 2).unwrap());
        assert_eq!(events[1].status, "Holiday");
    }

    #[test]
    fn test_rows_before_first_block_are_ignored() {
        let rows = vec![
            row(&["Attendance 2025"]),
            row(&["Jane Doe", "Sick"]),
            row(&["JANUARY"]),
            row(&["", "1"]),
            row(&["Jane Doe", "No Show"]),
        ];
        let events = parser().parse(&rows);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].absence_type, AbsenceType::NoShowNoCall);
        assert_eq!(events[0].authorization, Authorization::Unauthorized);
    }

    #[test]
    fn test_nonexistent_calendar_day_is_skipped() {
        let rows = vec![
            row(&["FEBRUARY"]),
            row(&["", "28", "30"]),
            row(&["Jane Doe", "Sick", "Sick"]),
        ];
        let events = parser().parse(&rows);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].day, 28);
    }

    #[test]
    fn test_short_rows_read_missing_cells_as_blank() {
        let rows = vec![
            row(&["JANUARY"]),
            row(&["", "1", "2", "3"]),
            row(&["Jane Doe", "Sick"]),
        ];
        assert_eq!(parser().parse(&rows).len(), 1);
    }

    #[test]
    fn test_status_keeps_raw_cell_text() {
        let rows = vec![row(&["JANUARY"]), row(&["", "1", "2"]), row(&["Jane Doe", " Sick ", " attended "])];
        let events = parser().parse(&rows);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, " Sick ");
        assert_eq!(events[0].absence_type, AbsenceType::Sick);
        assert_eq!(events[0].authorization, Authorization::Authorized);
    }

    #[test]
    fn test_unknown_status_is_other_with_unknown_authorization() {
        let rows = vec![row(&["JANUARY"]), row(&["", "1"]), row(&["Jane Doe", "Late"])];
        let events = parser().parse(&rows);
        assert_eq!(events[0].absence_type, AbsenceType::Other);
        assert_eq!(events[0].authorization, Authorization::Unknown);
    }

    #[test]
    fn test_classify_row_kinds() {
        let parser = parser();
        assert_eq!(parser.classify_row(&[]), RowKind::Blank);
        assert_eq!(parser.classify_row(&row(&["  "])), RowKind::Blank);
        assert_eq!(
            parser.classify_row(&row(&["december"])),
            RowKind::MonthName(Month::December)
        );
        assert_eq!(parser.classify_row(&row(&["No Show"])), RowKind::Legend);
        assert_eq!(parser.classify_row(&row(&["Jane Doe"])), RowKind::Data);
    }

    #[test]
    fn test_transition_from_seeking_ignores_data_rows() {
        let (state, events) = parser().transition(ScanState::SeekingBlock, &row(&["Jane", "Sick"]));
        assert_eq!(state, ScanState::SeekingBlock);
        assert!(events.is_empty());
    }

    #[test]
    fn test_transition_reads_header_after_month() {
        let state = ScanState::InBlock {
            month: Month::May,
            day_columns: None,
        };
        let (state, _) = parser().transition(state, &row(&["", "5"]));
        assert_eq!(
            state,
            ScanState::InBlock {
                month: Month::May,
                day_columns: Some(vec![DayColumn { column: 1, day: 5 }]),
            }
        );
    }

    #[test]
    fn test_parse_values_renders_numeric_cells() {
        let rows = vec![
            vec![Value::from("JANUARY")],
            vec![Value::from(""), Value::from(1), Value::from(2)],
            vec![Value::from("Jane Doe"), Value::Null, Value::from("Funeral")],
        ];
        let events = parser().parse_values(&rows);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].day, 2);
        assert_eq!(events[0].absence_type, AbsenceType::Funeral);
    }

    #[test]
    fn test_current_year_source_uses_clock() {
        let parser = GridParser::default();
        assert_eq!(parser.year(), Local::now().year());
    }

    #[test]
    fn test_month_from_label_rejects_abbreviations() {
        assert_eq!(month_from_label("JANUARY"), Some(Month::January));
        assert_eq!(month_from_label("Jan"), None);
        assert_eq!(month_from_label(""), None);
    }
}
