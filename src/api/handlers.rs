//! HTTP request handlers for the Absence Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::YearSource;
use crate::processing::{AbsenceFact, process_records, summarize};

use super::request::{GridRequest, RecordsRequest, SummaryRequest};
use super::response::{
    ApiError, ApiErrorResponse, GridResponse, RecordsResponse, SummaryResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/absences/grid", post(grid_handler))
        .route("/absences/records", post(records_handler))
        .route("/absences/summary", post(summary_handler))
        .with_state(state)
}

/// Handler for `POST /absences/grid`.
///
/// Parses an attendance grid into absence events.
async fn grid_handler(
    State(state): State<AppState>,
    payload: Result<Json<GridRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing grid request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let events = match request.year {
        Some(year) => state
            .parser()
            .clone()
            .with_year(YearSource::Fixed(year))
            .parse_values(&request.rows),
        None => state.parser().parse_values(&request.rows),
    };

    info!(
        correlation_id = %correlation_id,
        rows = request.rows.len(),
        events = events.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Grid parsed successfully"
    );
    json_response(GridResponse { events })
}

/// Handler for `POST /absences/records`.
///
/// Normalizes, validates and deduplicates leave-tracker rows.
async fn records_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecordsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing records request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let batch = process_records(&request.rows, state.config().field_plan(), Utc::now());

    info!(
        correlation_id = %correlation_id,
        rows = request.rows.len(),
        records = batch.records.len(),
        rejected = batch.rejected.len(),
        dropped = batch.dropped_rows,
        duration_us = start_time.elapsed().as_micros(),
        "Records processed successfully"
    );
    json_response(RecordsResponse {
        records: batch.records,
        rejected: batch.rejected,
        dropped_rows: batch.dropped_rows,
    })
}

/// Handler for `POST /absences/summary`.
///
/// Builds per-employee summaries from events and records.
async fn summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let recent_limit = request
        .recent_limit
        .unwrap_or_else(|| state.config().recent_limit());
    let facts = request
        .events
        .iter()
        .map(AbsenceFact::from)
        .chain(request.records.iter().map(AbsenceFact::from));
    let summaries = summarize(facts, recent_limit);

    info!(
        correlation_id = %correlation_id,
        events = request.events.len(),
        records = request.records.len(),
        employees = summaries.len(),
        "Summaries built successfully"
    );
    json_response(SummaryResponse { summaries })
}

fn json_response<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Turns a body extraction failure into a 400 error response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
