//! # REST API for Notifications
//!
//! Endpoints for running the notification checks and working the
//! dispatch queue (current + pending).

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use log::{error, info};

use crate::AppState;
use shared::AcknowledgeNotificationRequest;

/// Get the current notification queue
pub async fn get_notifications(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/notifications");

    let response = state.notification_service.queue_snapshot();
    (StatusCode::OK, Json(response)).into_response()
}

/// Run the notification checks against the current snapshot
pub async fn check_notifications(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/notifications/check");

    match state.notification_service.run_checks().await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to run notification checks: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error running checks").into_response()
        }
    }
}

/// Dismiss the current notification and promote the next pending one
pub async fn dismiss_notification(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/notifications/dismiss");

    let response = state.notification_service.dismiss_current();
    (StatusCode::OK, Json(response)).into_response()
}

/// Acknowledge a notification by ID
pub async fn acknowledge_notification(
    State(state): State<AppState>,
    Json(request): Json<AcknowledgeNotificationRequest>,
) -> impl IntoResponse {
    info!("POST /api/notifications/acknowledge - id: {}", request.id);

    if state.notification_service.acknowledge(&request.id) {
        (StatusCode::OK, Json(state.notification_service.queue_snapshot())).into_response()
    } else {
        (StatusCode::NOT_FOUND, "Notification not found").into_response()
    }
}

/// Clear the whole queue and acknowledge everything
pub async fn clear_notifications(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/notifications/clear");

    state.notification_service.clear_all();
    (StatusCode::OK, Json(state.notification_service.queue_snapshot())).into_response()
}
