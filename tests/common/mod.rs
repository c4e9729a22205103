#![allow(dead_code)]

use axum::Router;
use email_dashboard_core::{ApiClient, ConfigBuilder};
use serde_json::{json, Value};
use std::time::Duration;

/// Serves `app` on an ephemeral localhost port and returns its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn client_for(base_url: &str, timeout: Duration) -> ApiClient {
    let config = ConfigBuilder::new()
        .api_base_url(base_url)
        .request_timeout(timeout)
        .build()
        .unwrap();
    ApiClient::new(&config).unwrap()
}

pub fn result_json(email: &str, valid: bool, disposable: bool) -> Value {
    let domain = email.split_once('@').map(|(_, d)| d).unwrap_or("");
    json!({
        "email": email,
        "is_valid": valid,
        "syntax_valid": true,
        "domain_valid": valid,
        "smtp_valid": null,
        "risk_level": if valid { "low" } else { "high" },
        "is_disposable": disposable,
        "is_role_based": email.starts_with("info@"),
        "breach_status": false,
        "domain": domain,
        "provider": domain.split('.').next().unwrap_or(""),
    })
}

pub fn batch_json(batch_id: &str) -> Value {
    json!({
        "batch_id": batch_id,
        "total_emails": 4,
        "processed": 4,
        "valid_count": 3,
        "invalid_count": 1,
        "results": [
            result_json("alice@gmail.com", true, false),
            result_json("info@acme.io", true, false),
            result_json("temp@mailinator.com", true, true),
            result_json("ghost@nowhere.invalid", false, false),
        ],
        "created_at": "2024-03-04T15:05:00Z",
        "filename": "leads.csv",
    })
}
