//! Absence Engine
//!
//! This crate turns spreadsheet-style attendance data into structured
//! absence data. It parses month-block attendance grids into absence
//! events, normalizes leave-tracker rows into canonical records, validates
//! and deduplicates those records, and builds per-employee summaries.
//! Sources can be synced from disk concurrently or processed over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod processing;
pub mod sync;
