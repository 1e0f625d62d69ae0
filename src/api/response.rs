//! Response types for the Absence Engine API.
//!
//! This module defines the success bodies and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::models::{AbsenceEvent, EmployeeSummary, NormalizedRecord};
use crate::processing::RejectedRecord;

/// Response body for `POST /absences/grid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridResponse {
    /// Absence events in sheet order.
    pub events: Vec<AbsenceEvent>,
}

/// Response body for `POST /absences/records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsResponse {
    /// Valid, cleaned, deduplicated records.
    pub records: Vec<NormalizedRecord>,
    /// Records that failed validation.
    pub rejected: Vec<RejectedRecord>,
    /// Rows that could not be normalized.
    pub dropped_rows: usize,
}

/// Response body for `POST /absences/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// One summary per employee, in first-seen order.
    pub summaries: Vec<EmployeeSummary>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}
