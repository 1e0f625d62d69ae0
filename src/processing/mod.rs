//! Processing logic for the Absence Engine.
//!
//! This module turns raw sheet data into absence data: parsing month-block
//! attendance grids into events, classifying status labels, normalizing
//! loosely-shaped leave rows into canonical records, validating and
//! deduplicating those records, and folding everything into per-employee
//! summaries.

mod classification;
mod dates;
mod dedup;
mod grid_parser;
mod normalizer;
mod pipeline;
mod summary;
mod text;
mod validator;

pub use classification::{classify_status, infer_authorization};
pub use dates::{format_date, month_name, parse_date, parse_date_value, parse_timestamp, week_start};
pub use dedup::deduplicate;
pub use grid_parser::{DayColumn, GridParser, RowKind, ScanState, month_from_label, parse_header};
pub use normalizer::{NormalizeOutcome, Normalizer, UNKNOWN, parse_authorization, parse_flag};
pub use pipeline::{RecordBatch, RejectedRecord, process_records};
pub use summary::{AbsenceFact, summarize, summarize_events, summarize_records};
pub use text::parse_leading_int;
pub use validator::{ValidationResult, validate_record};
