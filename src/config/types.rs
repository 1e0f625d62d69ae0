//! Configuration types for absence processing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Number of entries kept in an employee's recent-absence list by default.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Provenance tag stamped on records when a source does not set its own.
pub const DEFAULT_PROVENANCE: &str = "leave-tracker-sheet";

/// Where the grid parser takes the year of each event from.
///
/// Attendance sheets do not carry a year, so by default events are stamped
/// with the year at parse time. That is wrong for sheets describing an
/// earlier year; pin the year with [`YearSource::Fixed`] for those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearSource {
    /// The current calendar year (local time) when parsing runs.
    #[default]
    Current,
    /// A fixed year.
    Fixed(i32),
}

impl From<Option<i32>> for YearSource {
    fn from(year: Option<i32>) -> Self {
        year.map_or(YearSource::Current, YearSource::Fixed)
    }
}

/// Grid parser settings from `parser.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Pinned year for events; the current year when absent.
    #[serde(default)]
    pub year: Option<i32>,
    /// Column-0 values that end a month block (compared case-insensitively).
    #[serde(default = "default_legend_keywords")]
    pub legend_keywords: Vec<String>,
}

impl ParserConfig {
    /// Returns the configured year source.
    pub fn year_source(&self) -> YearSource {
        self.year.into()
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            year: None,
            legend_keywords: default_legend_keywords(),
        }
    }
}

fn default_legend_keywords() -> Vec<String> {
    [
        "ATTENDED",
        "SICK",
        "PTO",
        "LEAVE",
        "HOLIDAY",
        "NO SHOW",
        "NO CALL",
        "NO SHOW/NO CALL",
        "OFFBOARDED",
        "EMERGENCY",
        "FUNERAL",
        "OTHER",
        "LEGEND",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// A field of the canonical leave record that can be extracted from a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Record identifier.
    Id,
    /// Source event timestamp.
    TimeStamp,
    /// Monday of the absence week.
    WeekStartDate,
    /// First day of the absence.
    StartDate,
    /// Last day of the absence.
    EndDate,
    /// Calendar-day count.
    NoOfDays,
    /// Business-day count.
    NoOfDaysNoWknd,
    /// Absentee name.
    NameOfAbsentee,
    /// Reason text.
    Reason,
    /// Authorization status.
    Authorized,
    /// Leave-form-sent flag.
    LeaveFormSent,
    /// Comment text.
    Comment,
    /// Client name.
    Client,
    /// Country.
    Country,
    /// ISO week number.
    WeekNumber,
    /// Month name.
    Month,
    /// Year.
    Year,
}

/// One place a field's value may be found in a raw row.
///
/// In YAML a number is a column index and a string is a header name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldSource {
    /// Zero-based column index.
    Position(usize),
    /// Header or object key.
    Named(String),
}

impl FieldSource {
    fn named(key: &str) -> Self {
        FieldSource::Named(key.to_string())
    }
}

/// The prioritized sources of every record field.
///
/// Sources for a field are tried in order; the first one that yields a
/// non-blank value wins.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPlan {
    sources: HashMap<Field, Vec<FieldSource>>,
    /// Provenance tag for records built with this plan.
    pub provenance: String,
}

impl FieldPlan {
    /// Returns the sources for a field, in priority order.
    pub fn sources(&self, field: Field) -> &[FieldSource] {
        self.sources.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the sources for a field.
    pub fn set_sources(&mut self, field: Field, sources: Vec<FieldSource>) {
        self.sources.insert(field, sources);
    }

    /// Returns a copy of this plan with a different provenance tag.
    pub fn with_provenance(&self, provenance: impl Into<String>) -> Self {
        Self {
            sources: self.sources.clone(),
            provenance: provenance.into(),
        }
    }
}

impl Default for FieldPlan {
    /// The layout of the leave-tracker sheet: camelCase API keys first, then
    /// the sheet header, then the column position.
    fn default() -> Self {
        use FieldSource::Position;

        let entries = [
            (Field::Id, vec![FieldSource::named("id")]),
            (
                Field::TimeStamp,
                vec![
                    FieldSource::named("timeStamp"),
                    FieldSource::named("Timestamp"),
                    Position(0),
                ],
            ),
            (
                Field::WeekStartDate,
                vec![
                    FieldSource::named("weekStartDate"),
                    FieldSource::named("Week Start Date"),
                    Position(1),
                ],
            ),
            (
                Field::StartDate,
                vec![
                    FieldSource::named("startDate"),
                    FieldSource::named("Start Date"),
                    Position(2),
                ],
            ),
            (
                Field::EndDate,
                vec![
                    FieldSource::named("endDate"),
                    FieldSource::named("End Date"),
                    Position(3),
                ],
            ),
            (
                Field::NoOfDays,
                vec![
                    FieldSource::named("noOfDays"),
                    FieldSource::named("No. of Days"),
                    Position(4),
                ],
            ),
            (
                Field::NoOfDaysNoWknd,
                vec![
                    FieldSource::named("noOfDaysNoWknd"),
                    FieldSource::named("No. of Days (No Weekends)"),
                    Position(5),
                ],
            ),
            (
                Field::NameOfAbsentee,
                vec![
                    FieldSource::named("nameOfAbsentee"),
                    FieldSource::named("Name of Absentee"),
                    Position(6),
                ],
            ),
            (
                Field::Reason,
                vec![
                    FieldSource::named("reason"),
                    FieldSource::named("Reason"),
                    Position(7),
                ],
            ),
            (
                Field::Authorized,
                vec![
                    FieldSource::named("authorized"),
                    FieldSource::named("Authorized"),
                    Position(8),
                ],
            ),
            (
                Field::LeaveFormSent,
                vec![
                    FieldSource::named("leaveFormSent"),
                    FieldSource::named("Leave Form Sent"),
                    Position(9),
                ],
            ),
            (
                Field::Comment,
                vec![
                    FieldSource::named("comment"),
                    FieldSource::named("Comment"),
                    Position(10),
                ],
            ),
            (
                Field::Client,
                vec![
                    FieldSource::named("client"),
                    FieldSource::named("Client"),
                    Position(11),
                ],
            ),
            (
                Field::Country,
                vec![
                    FieldSource::named("country"),
                    FieldSource::named("Country"),
                    Position(12),
                ],
            ),
            (
                Field::WeekNumber,
                vec![
                    FieldSource::named("weekNumber"),
                    FieldSource::named("Week Number"),
                ],
            ),
            (
                Field::Month,
                vec![FieldSource::named("month"), FieldSource::named("Month")],
            ),
            (
                Field::Year,
                vec![FieldSource::named("year"), FieldSource::named("Year")],
            ),
        ];

        Self {
            sources: entries.into_iter().collect(),
            provenance: DEFAULT_PROVENANCE.to_string(),
        }
    }
}

/// Field overrides from `fields.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldsConfig {
    /// Provenance tag for records; the default tag when absent.
    #[serde(default)]
    pub provenance: Option<String>,
    /// Per-field source lists replacing the default ones.
    #[serde(default)]
    pub fields: HashMap<Field, Vec<FieldSource>>,
}

impl FieldsConfig {
    /// Applies the overrides on top of the default plan.
    pub fn into_plan(self) -> FieldPlan {
        let mut plan = FieldPlan::default();
        for (field, sources) in self.fields {
            plan.set_sources(field, sources);
        }
        if let Some(provenance) = self.provenance {
            plan.provenance = provenance;
        }
        plan
    }
}

/// The shape of a sync source's input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A month-block attendance grid (JSON array of rows of cells).
    Grid,
    /// Leave-tracker rows (JSON array of objects or arrays).
    Records,
}

/// How a source's output is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Records as camelCase JSON objects.
    #[default]
    Json,
    /// Records as snake_case column maps for a bulk insert.
    Relational,
}

/// One sync source from `sync.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Unique name, used in logs and reports.
    pub name: String,
    /// Input file shape.
    pub kind: SourceKind,
    /// Path of the JSON input file.
    pub input: PathBuf,
    /// Path of the output file.
    pub output: PathBuf,
    /// Output format for records sources.
    #[serde(default)]
    pub format: OutputFormat,
    /// Optional path for per-employee summaries.
    #[serde(default)]
    pub summary_output: Option<PathBuf>,
    /// Provenance tag overriding the field plan's.
    #[serde(default)]
    pub provenance: Option<String>,
}

/// Sync settings from `sync.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Size of each employee's recent-absence list.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    /// Sources to sync.
    pub sources: Vec<SourceConfig>,
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    sync: SyncConfig,
    parser: ParserConfig,
    fields: FieldPlan,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(sync: SyncConfig, parser: ParserConfig, fields: FieldPlan) -> Self {
        Self {
            sync,
            parser,
            fields,
        }
    }

    /// Returns the sync settings.
    pub fn sync(&self) -> &SyncConfig {
        &self.sync
    }

    /// Returns the grid parser settings.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the field plan.
    pub fn fields(&self) -> &FieldPlan {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_source_from_option() {
        assert_eq!(YearSource::from(None), YearSource::Current);
        assert_eq!(YearSource::from(Some(2023)), YearSource::Fixed(2023));
    }

    #[test]
    fn test_parser_config_defaults_when_empty() {
        let config: ParserConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.year_source(), YearSource::Current);
        assert!(config.legend_keywords.contains(&"ATTENDED".to_string()));
    }

    #[test]
    fn test_field_sources_deserialize_names_and_positions() {
        let yaml = r#"
provenance: hr-export
fields:
  start_date: ["From", 4]
  name_of_absentee: ["Employee"]
"#;
        let config: FieldsConfig = serde_yaml::from_str(yaml).unwrap();
        let plan = config.into_plan();

        assert_eq!(plan.provenance, "hr-export");
        assert_eq!(
            plan.sources(Field::StartDate),
            &[
                FieldSource::Named("From".to_string()),
                FieldSource::Position(4)
            ]
        );
        assert_eq!(
            plan.sources(Field::NameOfAbsentee),
            &[FieldSource::Named("Employee".to_string())]
        );
        // Untouched fields keep the default plan.
        assert_eq!(plan.sources(Field::EndDate).len(), 3);
    }

    #[test]
    fn test_default_plan_covers_every_field() {
        let plan = FieldPlan::default();
        for field in [
            Field::Id,
            Field::TimeStamp,
            Field::WeekStartDate,
            Field::StartDate,
            Field::EndDate,
            Field::NoOfDays,
            Field::NoOfDaysNoWknd,
            Field::NameOfAbsentee,
            Field::Reason,
            Field::Authorized,
            Field::LeaveFormSent,
            Field::Comment,
            Field::Client,
            Field::Country,
            Field::WeekNumber,
            Field::Month,
            Field::Year,
        ] {
            assert!(!plan.sources(field).is_empty(), "{:?} has no sources", field);
        }
    }

    #[test]
    fn test_source_config_defaults() {
        let yaml = r#"
name: leave-tracker
kind: records
input: data/leave.json
output: out/leave.json
"#;
        let source: SourceConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(source.kind, SourceKind::Records);
        assert_eq!(source.format, OutputFormat::Json);
        assert!(source.summary_output.is_none());
    }

    #[test]
    fn test_sync_config_default_recent_limit() {
        let config: SyncConfig = serde_yaml::from_str("sources: []").unwrap();
        assert_eq!(config.recent_limit, DEFAULT_RECENT_LIMIT);
    }
}
