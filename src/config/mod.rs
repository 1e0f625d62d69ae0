//! Configuration loading and management for the Absence Engine.
//!
//! This module loads sync sources, grid parser settings and the record
//! field plan from a directory of YAML files.
//!
//! # Example
//!
//! ```no_run
//! use absence_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/csp").unwrap();
//! println!("{} sources configured", config.sources().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_PROVENANCE, DEFAULT_RECENT_LIMIT, EngineConfig, Field, FieldPlan, FieldSource,
    FieldsConfig, OutputFormat, ParserConfig, SourceConfig, SourceKind, SyncConfig, YearSource,
};
