//! # REST API for Targets
//!
//! Endpoints for reading and updating the user's earning targets.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::AppState;
use shared::UpdateTargetsRequest;

/// Get the current targets
pub async fn get_targets(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/targets");

    match state.target_service.get_targets().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to load targets: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading targets").into_response()
        }
    }
}

/// Replace the current targets
pub async fn update_targets(
    State(state): State<AppState>,
    Json(request): Json<UpdateTargetsRequest>,
) -> impl IntoResponse {
    info!("PUT /api/targets - request: {:?}", request);

    match state.target_service.update_targets(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to update targets: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
