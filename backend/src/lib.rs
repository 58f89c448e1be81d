//! # Tip Tracker Backend
//!
//! Non-UI logic for the tip tracker: income record snapshot, earning
//! targets, and the achievement/alert notification checks.
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (YAML files)
//! ```
//!
//! It is UI-agnostic: any frontend (or a CLI) can drive it through the
//! router built by [`create_router`].

pub mod domain;
pub mod io;
pub mod storage;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use anyhow::Result;
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::{
    ExportService, NotificationLedger, NotificationService, RecordService, TargetService,
};
use crate::storage::{LedgerRepository, TargetsRepository, YamlConnection};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub record_service: RecordService,
    pub target_service: TargetService,
    pub notification_service: NotificationService,
    pub export_service: ExportService,
}

/// Initialize the backend in the default data directory
pub async fn initialize_backend() -> Result<AppState> {
    let connection = YamlConnection::new_default()?;
    initialize_with_connection(connection).await
}

/// Initialize the backend against a specific data directory
pub async fn initialize_with_connection(connection: YamlConnection) -> Result<AppState> {
    info!("Setting up domain services");

    let record_service = RecordService::new();
    let target_service = TargetService::new(TargetsRepository::new(connection.clone()));
    let ledger = NotificationLedger::load(LedgerRepository::new(connection)).await;
    let notification_service =
        NotificationService::new(record_service.clone(), target_service.clone(), ledger);
    let export_service = ExportService::new();

    Ok(AppState {
        record_service,
        target_service,
        notification_service,
        export_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow a local frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/records", get(io::list_records).post(io::create_record))
        .route("/targets", get(io::get_targets).put(io::update_targets))
        .route("/notifications", get(io::get_notifications))
        .route("/notifications/check", post(io::check_notifications))
        .route("/notifications/dismiss", post(io::dismiss_notification))
        .route("/notifications/acknowledge", post(io::acknowledge_notification))
        .route("/notifications/clear", post(io::clear_notifications))
        .route("/export", get(io::export_records));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::NaiveDate;
    use shared::{
        IncomeRecord, NotificationQueueResponse, RecordListResponse, TargetsResponse,
        UpsertRecordRequest,
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn test_router() -> (Router, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = YamlConnection::new(temp_dir.path()).unwrap();
        let app_state = initialize_with_connection(connection).await.unwrap();
        (create_router(app_state), temp_dir)
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sample_record() -> IncomeRecord {
        IncomeRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
            hours_worked: 8.0,
            sales_amount: 400.0,
            tips_amount: 90.0,
            total_revenue: 250.0,
        }
    }

    #[tokio::test]
    async fn test_get_notifications_starts_empty() {
        let (router, _temp_dir) = test_router().await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/notifications")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let queue: NotificationQueueResponse = body_json(response).await;
        assert!(queue.current.is_none());
        assert!(queue.pending.is_empty());
    }

    #[tokio::test]
    async fn test_create_and_list_records() {
        let (router, _temp_dir) = test_router().await;

        let request = UpsertRecordRequest {
            record: sample_record(),
        };
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/records")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_string(&request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/records")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let list: RecordListResponse = body_json(response).await;
        assert_eq!(list.records, vec![sample_record()]);
    }

    #[tokio::test]
    async fn test_create_record_rejects_negative_values() {
        let (router, _temp_dir) = test_router().await;

        let mut record = sample_record();
        record.tips_amount = -5.0;
        let request = UpsertRecordRequest { record };

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/records")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_string(&request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_targets_returns_defaults() {
        let (router, _temp_dir) = test_router().await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/targets")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let targets: TargetsResponse = body_json(response).await;
        assert_eq!(targets.targets, shared::TargetConfig::default());
    }
}
