//! Source synchronization.
//!
//! Each configured source is an already-fetched JSON file. A sync run
//! processes every source concurrently and writes each one's output, with
//! one [`SyncReport`] per source. Records can be written as plain JSON or
//! as snake_case rows ready for a relational insert.

mod job;
mod relational;

pub use job::{SyncContext, SyncReport, run_all, run_source};
pub use relational::{COLUMN_MAP, LEAVE_RECORDS_TABLE, RelationalRow, insert_sql, to_relational_rows};
