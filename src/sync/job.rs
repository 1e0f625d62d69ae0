//! Sync jobs.
//!
//! A job reads one source's already-fetched JSON file, runs it through the
//! processing pipeline and writes the result. Jobs for different sources
//! share nothing mutable and write distinct files, so they run concurrently
//! and a failing job only ever fails its own report.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::config::{ConfigLoader, FieldPlan, OutputFormat, SourceConfig, SourceKind};
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeSummary, RawRow};
use crate::processing::{GridParser, process_records, summarize_events, summarize_records};

use super::relational::to_relational_rows;

/// The result of syncing one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    /// The configured source name.
    pub source: String,
    /// Whether the output was written.
    pub success: bool,
    /// Events or records written (zero on failure).
    pub records_written: usize,
    /// Rows that could not be normalized.
    pub dropped_rows: usize,
    /// Records excluded for failing validation.
    pub rejected_records: usize,
    /// Where the output was (or would have been) written.
    pub output: PathBuf,
    /// Why the job failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The sync time shared by every job of a run.
    pub synced_at: DateTime<Utc>,
}

impl SyncReport {
    fn failure(source: &SourceConfig, synced_at: DateTime<Utc>, error: impl Into<String>) -> Self {
        Self {
            source: source.name.clone(),
            success: false,
            records_written: 0,
            dropped_rows: 0,
            rejected_records: 0,
            output: source.output.clone(),
            error: Some(error.into()),
            synced_at,
        }
    }
}

/// Counts collected while a job runs.
#[derive(Debug, Default)]
struct JobStats {
    written: usize,
    dropped_rows: usize,
    rejected_records: usize,
}

/// Shared, read-only inputs for every job of a run.
#[derive(Debug, Clone)]
pub struct SyncContext {
    parser: GridParser,
    plan: FieldPlan,
    recent_limit: usize,
}

impl SyncContext {
    /// Creates a context from its parts.
    pub fn new(parser: GridParser, plan: FieldPlan, recent_limit: usize) -> Self {
        Self {
            parser,
            plan,
            recent_limit,
        }
    }

    /// Creates a context from loaded configuration.
    pub fn from_loader(loader: &ConfigLoader) -> Self {
        Self::new(
            GridParser::new(loader.parser()),
            loader.field_plan().clone(),
            loader.recent_limit(),
        )
    }
}

/// Syncs every configured source concurrently.
///
/// Reports come back in configuration order, one per source. A job that
/// fails (or panics) gets a failure report; the others are unaffected.
pub async fn run_all(loader: &ConfigLoader) -> Vec<SyncReport> {
    let synced_at = Utc::now();
    let context = Arc::new(SyncContext::from_loader(loader));
    let sources = loader.sources().to_vec();

    info!(sources = sources.len(), synced_at = %synced_at, "Starting sync run");

    let mut jobs = JoinSet::new();
    for (position, source) in sources.iter().cloned().enumerate() {
        let context = Arc::clone(&context);
        jobs.spawn(async move { (position, run_source(&source, &context, synced_at).await) });
    }

    let mut slots: Vec<Option<SyncReport>> = vec![None; sources.len()];
    while let Some(joined) = jobs.join_next().await {
        match joined {
            Ok((position, report)) => slots[position] = Some(report),
            Err(join_error) => error!(error = %join_error, "Sync job aborted"),
        }
    }

    let reports: Vec<SyncReport> = slots
        .into_iter()
        .zip(&sources)
        .map(|(slot, source)| {
            slot.unwrap_or_else(|| SyncReport::failure(source, synced_at, "sync job aborted"))
        })
        .collect();

    let failed = reports.iter().filter(|r| !r.success).count();
    info!(sources = reports.len(), failed, "Sync run finished");
    reports
}

/// Syncs one source. Never fails; errors become a failure report.
pub async fn run_source(
    source: &SourceConfig,
    context: &SyncContext,
    synced_at: DateTime<Utc>,
) -> SyncReport {
    match sync_source(source, context, synced_at).await {
        Ok(stats) => {
            info!(
                source = %source.name,
                written = stats.written,
                dropped = stats.dropped_rows,
                rejected = stats.rejected_records,
                output = %source.output.display(),
                "Source synced"
            );
            SyncReport {
                source: source.name.clone(),
                success: true,
                records_written: stats.written,
                dropped_rows: stats.dropped_rows,
                rejected_records: stats.rejected_records,
                output: source.output.clone(),
                error: None,
                synced_at,
            }
        }
        Err(err) => {
            warn!(source = %source.name, error = %err, "Source sync failed");
            SyncReport::failure(source, synced_at, err.to_string())
        }
    }
}

async fn sync_source(
    source: &SourceConfig,
    context: &SyncContext,
    synced_at: DateTime<Utc>,
) -> EngineResult<JobStats> {
    let content = tokio::fs::read_to_string(&source.input)
        .await
        .map_err(|e| EngineError::SourceRead {
            source_name: source.name.clone(),
            path: source.input.display().to_string(),
            message: e.to_string(),
        })?;

    match source.kind {
        SourceKind::Grid => sync_grid(source, context, &content).await,
        SourceKind::Records => sync_records(source, context, &content, synced_at).await,
    }
}

async fn sync_grid(source: &SourceConfig, context: &SyncContext, content: &str) -> EngineResult<JobStats> {
    let rows: Vec<Vec<Value>> = parse_source(source, content)?;
    let events = context.parser.parse_values(&rows);

    write_json(&source.output, &events).await?;
    if let Some(path) = &source.summary_output {
        write_summaries(path, summarize_events(&events, context.recent_limit)).await?;
    }

    Ok(JobStats {
        written: events.len(),
        ..JobStats::default()
    })
}

async fn sync_records(
    source: &SourceConfig,
    context: &SyncContext,
    content: &str,
    synced_at: DateTime<Utc>,
) -> EngineResult<JobStats> {
    let rows: Vec<RawRow> = parse_source(source, content)?;

    let plan = match &source.provenance {
        Some(provenance) => context.plan.with_provenance(provenance.clone()),
        None => context.plan.clone(),
    };
    let batch = process_records(&rows, &plan, synced_at);
    let records = batch.records;

    match source.format {
        OutputFormat::Json => write_json(&source.output, &records).await?,
        OutputFormat::Relational => {
            let rows = to_relational_rows(&records).map_err(|e| EngineError::OutputWrite {
                path: source.output.display().to_string(),
                message: e.to_string(),
            })?;
            write_json(&source.output, &rows).await?
        }
    }
    if let Some(path) = &source.summary_output {
        write_summaries(path, summarize_records(&records, context.recent_limit)).await?;
    }

    Ok(JobStats {
        written: records.len(),
        dropped_rows: batch.dropped_rows,
        rejected_records: batch.rejected.len(),
    })
}

fn parse_source<T: serde::de::DeserializeOwned>(source: &SourceConfig, content: &str) -> EngineResult<T> {
    serde_json::from_str(content).map_err(|e| EngineError::SourceParse {
        source_name: source.name.clone(),
        message: e.to_string(),
    })
}

async fn write_summaries(path: &Path, summaries: Vec<EmployeeSummary>) -> EngineResult<()> {
    write_json(path, &summaries).await
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> EngineResult<()> {
    let write_error = |message: String| EngineError::OutputWrite {
        path: path.display().to_string(),
        message,
    };

    let bytes = serde_json::to_vec_pretty(value).map_err(|e| write_error(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| write_error(e.to_string()))?;
    }

    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| write_error(e.to_string()))
}
