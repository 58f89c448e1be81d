//! # REST API for Income Records
//!
//! Endpoints for listing records and storing a day's record.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::AppState;
use shared::UpsertRecordRequest;

/// List all income records in chronological order
pub async fn list_records(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/records");

    let response = state.record_service.list_records();
    (StatusCode::OK, Json(response)).into_response()
}

/// Store (or replace) a day's income record
pub async fn create_record(
    State(state): State<AppState>,
    Json(request): Json<UpsertRecordRequest>,
) -> impl IntoResponse {
    info!("POST /api/records - date: {}", request.record.date);

    match state.record_service.upsert_record(request) {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to store record: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
