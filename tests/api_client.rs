mod common;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use email_dashboard_core::results::{ResultFilter, RiskFilter, StatusFilter, ValidEmailExport};
use email_dashboard_core::{AppError, RiskLevel, ValidationRequest};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Default)]
struct Hits {
    bulk: Arc<AtomicUsize>,
    batch: Arc<AtomicUsize>,
    last_validate_body: Arc<parking_lot::Mutex<Option<Value>>>,
}

fn backend(hits: Hits) -> Router {
    Router::new()
        .route(
            "/validate",
            post(|State(hits): State<Hits>, Json(body): Json<Value>| async move {
                *hits.last_validate_body.lock() = Some(body.clone());
                let email = body["email"].as_str().unwrap_or_default().to_string();
                if email == "broken@example.com" {
                    return (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(json!({"detail": "Email could not be processed"})),
                    );
                }
                (StatusCode::OK, Json(common::result_json(&email, true, false)))
            }),
        )
        .route(
            "/validate/bulk",
            post(|State(hits): State<Hits>, Json(body): Json<Value>| async move {
                hits.bulk.fetch_add(1, Ordering::SeqCst);
                let count = body["emails"].as_array().map(|a| a.len()).unwrap_or(0);
                Json(json!({"batch_id": format!("batch-{}", count)}))
            }),
        )
        .route(
            "/batch/history",
            get(|| async { Json(json!([common::batch_json("aaaaaaaa-1111"), common::batch_json("bbbbbbbb-2222")])) }),
        )
        .route(
            "/batch/{id}",
            get(|State(hits): State<Hits>, Path(id): Path<String>| async move {
                hits.batch.fetch_add(1, Ordering::SeqCst);
                if id == "missing" {
                    return (
                        StatusCode::NOT_FOUND,
                        Json(json!({"message": "Batch not found"})),
                    );
                }
                (StatusCode::OK, Json(common::batch_json(&id)))
            }),
        )
        .route(
            "/analytics",
            get(|| async {
                Json(json!({
                    "total_processed": 1250,
                    "valid_percentage": 80.0,
                    "invalid_percentage": 20.0,
                    "disposable_percentage": 5.0,
                    "role_based_percentage": 2.5,
                    "domain_distribution": {"gmail.com": 700, "acme.io": 50},
                    "daily_volume": [{"date": "2024-03-04", "count": 1250}]
                }))
            }),
        )
        .route(
            "/health",
            get(|| async { Json(json!({"status": "ok", "version": "1.0.0"})) }),
        )
        .with_state(hits)
}

#[tokio::test]
async fn validate_email_sends_options_and_parses_result() {
    let hits = Hits::default();
    let base = common::spawn_server(backend(hits.clone())).await;
    let client = common::client_for(&base, Duration::from_secs(5));

    let mut request = ValidationRequest::full(" alice@gmail.com ");
    request.check_breach = Some(false);
    let result = client.validate_email(&request).await.unwrap();

    assert_eq!(result.email, "alice@gmail.com");
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert_eq!(result.smtp_valid, None);

    let body = hits.last_validate_body.lock().clone().unwrap();
    assert_eq!(body["email"], "alice@gmail.com");
    assert_eq!(body["check_smtp"], true);
    assert_eq!(body["check_breach"], false);
}

#[tokio::test]
async fn compat_validation_reads_status_field() {
    let hits = Hits::default();
    let base = common::spawn_server(backend(hits.clone())).await;
    let client = common::client_for(&base, Duration::from_secs(5));

    let resp = client
        .validate_email_compat(&ValidationRequest::legacy("bob@acme.io", false))
        .await
        .unwrap();
    assert_eq!(resp.email, "bob@acme.io");
    assert_eq!(resp.is_valid, Some(true));
    assert_eq!(resp.status_label(), "Valid");

    let body = hits.last_validate_body.lock().clone().unwrap();
    assert_eq!(body, json!({"email": "bob@acme.io", "check_smtp": false}));
}

#[tokio::test]
async fn api_error_detail_is_surfaced() {
    let base = common::spawn_server(backend(Hits::default())).await;
    let client = common::client_for(&base, Duration::from_secs(5));

    let err = client
        .validate_email(&ValidationRequest::full("broken@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.to_string(), "Email could not be processed");
}

#[tokio::test]
async fn api_error_message_field_is_surfaced() {
    let base = common::spawn_server(backend(Hits::default())).await;
    let client = common::client_for(&base, Duration::from_secs(5));

    let err = client.get_batch_status("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Batch not found");
}

#[tokio::test]
async fn plain_text_error_falls_back_to_status() {
    let app = Router::new().route(
        "/analytics",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream down") }),
    );
    let base = common::spawn_server(app).await;
    let client = common::client_for(&base, Duration::from_secs(5));

    let err = client.get_analytics().await.unwrap_err();
    assert_eq!(err.to_string(), "API Error: 503 Service Unavailable");
}

#[tokio::test]
async fn malformed_success_body_is_json_error() {
    let app = Router::new().route("/health", get(|| async { "not json" }));
    let base = common::spawn_server(app).await;
    let client = common::client_for(&base, Duration::from_secs(5));

    let err = client.health_check().await.unwrap_err();
    assert!(matches!(err, AppError::Json(_)));
}

#[tokio::test]
async fn empty_bulk_list_never_reaches_the_network() {
    let hits = Hits::default();
    let base = common::spawn_server(backend(hits.clone())).await;
    let client = common::client_for(&base, Duration::from_secs(5));

    let err = client.bulk_validate(&[]).await.unwrap_err();
    assert_eq!(err.to_string(), "No emails provided for validation");
    assert_eq!(hits.bulk.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn oversized_bulk_list_never_reaches_the_network() {
    let hits = Hits::default();
    let base = common::spawn_server(backend(hits.clone())).await;
    let client = common::client_for(&base, Duration::from_secs(5));

    let emails: Vec<String> = (0..10_001).map(|i| format!("user{}@example.com", i)).collect();
    let err = client.bulk_validate(&emails).await.unwrap_err();
    assert_eq!(err.to_string(), "Maximum 10,000 emails allowed per batch");
    assert_eq!(hits.bulk.load(Ordering::SeqCst), 0);

    let submission = client.bulk_validate(&emails[..10_000]).await.unwrap();
    assert_eq!(submission.batch_id, "batch-10000");
    assert_eq!(hits.bulk.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn blank_batch_id_never_reaches_the_network() {
    let hits = Hits::default();
    let base = common::spawn_server(backend(hits.clone())).await;
    let client = common::client_for(&base, Duration::from_secs(5));

    let err = client.get_batch_status("  ").await.unwrap_err();
    assert_eq!(err.to_string(), "Batch ID is required");
    assert_eq!(hits.batch.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn slow_response_surfaces_timeout_error() {
    let app = Router::new().route(
        "/health",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"status": "ok", "version": "1.0.0"}))
        }),
    );
    let base = common::spawn_server(app).await;
    let client = common::client_for(&base, Duration::from_millis(200));

    let started = std::time::Instant::now();
    let err = client.health_check().await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {:?}", err);
    assert_eq!(err.to_string(), "Request timeout - please try again");
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn unreachable_api_is_a_network_error() {
    let base = common::dead_url().await;
    let client = common::client_for(&base, Duration::from_secs(5));

    let err = client.health_check().await.unwrap_err();
    assert!(matches!(err, AppError::Request(_)));
    assert!(err.to_string().starts_with("Network error"));
}

#[tokio::test]
async fn batch_fetch_filter_and_export() {
    let base = common::spawn_server(backend(Hits::default())).await;
    let client = common::client_for(&base, Duration::from_secs(5));

    let batch = client.get_batch_status("f47ac10b-58cc").await.unwrap();
    assert_eq!(batch.results.len(), 4);
    assert_eq!(batch.filename, "leads.csv");

    let disposable = ResultFilter::new("", StatusFilter::Disposable, RiskFilter::All);
    let rows = disposable.apply(&batch.results);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].email, "temp@mailinator.com");

    let high = ResultFilter::new("nowhere", StatusFilter::Invalid, RiskFilter::Only(RiskLevel::High));
    assert_eq!(high.apply(&batch.results).len(), 1);

    let export = ValidEmailExport::from_batch(&batch);
    assert_eq!(export.file_name, "validated-emails-f47ac10b.txt");
    assert_eq!(export.emails.len(), 3);
}

#[tokio::test]
async fn history_accepts_naive_timestamps_and_unknown_risk() {
    let app = Router::new().route(
        "/batch/history",
        get(|| async {
            let mut batch = common::batch_json("cccccccc-3333");
            batch["created_at"] = json!("2024-03-04T15:05:00.123456");
            batch["results"][0]["risk_level"] = json!("unknown");
            Json(json!([batch]))
        }),
    );
    let base = common::spawn_server(app).await;
    let client = common::client_for(&base, Duration::from_secs(5));

    let history = client.get_batch_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].created_at.to_rfc3339(), "2024-03-04T15:05:00.123456+00:00");
    assert_eq!(history[0].results[0].risk_level, RiskLevel::Unknown);
    assert_eq!(history[0].results[1].risk_level, RiskLevel::Low);
}

#[tokio::test]
async fn history_and_analytics_deserialize() {
    let base = common::spawn_server(backend(Hits::default())).await;
    let client = common::client_for(&base, Duration::from_secs(5));

    let history = client.get_batch_history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].short_id(), "bbbbbbbb");

    let analytics = client.get_analytics().await.unwrap();
    assert_eq!(analytics.total_processed, 1250);
    assert_eq!(analytics.domain_distribution["gmail.com"], 700);

    let health = client.health_check().await.unwrap();
    assert_eq!(health.version, "1.0.0");
}
