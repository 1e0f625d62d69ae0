//! HTTP API module for the Absence Engine.
//!
//! This module exposes grid parsing, record processing and summary
//! building as REST endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{GridRequest, RecordsRequest, SummaryRequest};
pub use response::{ApiError, GridResponse, RecordsResponse, SummaryResponse};
pub use state::AppState;
