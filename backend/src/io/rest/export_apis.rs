//! # REST API for Export
//!
//! Endpoint returning the record snapshot as CSV data.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::AppState;

/// Export all income records as CSV
pub async fn export_records(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/export");

    match state.export_service.export_records_csv(&state.record_service) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to export records: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error exporting records").into_response()
        }
    }
}
