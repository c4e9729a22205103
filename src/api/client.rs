//! HTTP client for the email validation API.

use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::core::models::{
    AnalyticsSummary, BulkSubmission, BulkValidationRequest, BulkValidationResult, HealthStatus,
    LegacyValidationResponse, ValidationRequest, ValidationResult,
};
use crate::utils::format::format_thousands;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use url::Url;

/// Thin wrapper over `reqwest` that knows the API's endpoints and error conventions.
///
/// Every request is bounded by `Config::request_timeout`. Hitting it yields
/// [`AppError::Timeout`], never a generic transport error.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Config,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Initialization(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!(target: "api", "API client targeting {}", config.api_base_url);
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.api_base_url
    }

    pub fn timeout(&self) -> Duration {
        self.config.request_timeout
    }

    /// Validates one address with the full result shape.
    pub async fn validate_email(&self, request: &ValidationRequest) -> Result<ValidationResult> {
        let request = normalized_request(request)?;
        let url = self.config.endpoint_url("/validate")?;
        self.execute(self.http.post(url).json(&request)).await
    }

    /// Validates one address, accepting the legacy `{email, status}` response.
    pub async fn validate_email_compat(
        &self,
        request: &ValidationRequest,
    ) -> Result<LegacyValidationResponse> {
        let request = normalized_request(request)?;
        let url = self.config.endpoint_url("/validate")?;
        self.execute(self.http.post(url).json(&request)).await
    }

    /// Submits a list for background validation and returns its batch id.
    ///
    /// Empty and oversized lists are rejected without touching the network.
    pub async fn bulk_validate(&self, emails: &[String]) -> Result<BulkSubmission> {
        check_bulk_size(emails.len(), self.config.max_bulk_emails)?;

        let url = self.config.endpoint_url("/validate/bulk")?;
        let body = BulkValidationRequest {
            emails: emails.to_vec(),
        };
        tracing::info!(target: "api", "Submitting {} emails for bulk validation", emails.len());
        self.execute(self.http.post(url).json(&body)).await
    }

    pub async fn get_batch_status(&self, batch_id: &str) -> Result<BulkValidationResult> {
        let batch_id = batch_id.trim();
        if batch_id.is_empty() {
            return Err(AppError::InvalidInput("Batch ID is required".into()));
        }

        let mut url = self.config.endpoint_url("/batch")?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config("API base URL cannot be used as a base".into()))?
            .push(batch_id);
        self.execute(self.http.get(url)).await
    }

    pub async fn get_batch_history(&self) -> Result<Vec<BulkValidationResult>> {
        let url = self.config.endpoint_url("/batch/history")?;
        self.execute(self.http.get(url)).await
    }

    pub async fn get_analytics(&self) -> Result<AnalyticsSummary> {
        let url = self.config.endpoint_url("/analytics")?;
        self.execute(self.http.get(url)).await
    }

    pub async fn health_check(&self) -> Result<HealthStatus> {
        let url = self.config.endpoint_url("/health")?;
        self.execute(self.http.get(url)).await
    }

    /// Sends the request under the configured timeout and decodes a JSON body.
    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let request = builder.build()?;
        let label = format!("{} {}", request.method(), request.url().path());
        let started = Instant::now();

        let outcome = tokio::time::timeout(self.config.request_timeout, async {
            let response = self.http.execute(request).await.map_err(transport_error)?;
            let status = response.status();
            let body = response.bytes().await.map_err(transport_error)?;

            if !status.is_success() {
                let message = extract_error_message(status, &body);
                tracing::warn!(target: "api", "{} failed with {}: {}", label, status, message);
                return Err(AppError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            serde_json::from_slice::<T>(&body).map_err(AppError::from)
        })
        .await;

        match outcome {
            Ok(result) => {
                tracing::debug!(target: "api", "{} finished in {:.2?}", label, started.elapsed());
                result
            }
            Err(_) => {
                tracing::warn!(
                    target: "api",
                    "{} timed out after {:.2?}",
                    label,
                    self.config.request_timeout
                );
                Err(AppError::Timeout)
            }
        }
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout
    } else {
        AppError::Request(err)
    }
}

fn normalized_request(request: &ValidationRequest) -> Result<ValidationRequest> {
    let email = request.email.trim();
    if email.is_empty() {
        return Err(AppError::InvalidInput("Email address is required".into()));
    }
    Ok(ValidationRequest {
        email: email.to_string(),
        ..request.clone()
    })
}

/// Local guard for bulk submissions.
pub fn check_bulk_size(count: usize, max: usize) -> Result<()> {
    if count == 0 {
        return Err(AppError::InvalidInput(
            "No emails provided for validation".into(),
        ));
    }
    if count > max {
        return Err(AppError::InvalidInput(format!(
            "Maximum {} emails allowed per batch",
            format_thousands(max as u64)
        )));
    }
    Ok(())
}

/// Picks the user-facing message for a failed response.
///
/// Prefers a non-empty `detail`, then `message`, then `API Error: {code} {reason}`.
pub fn extract_error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_slice::<serde_json::Value>(body) {
        for key in ["detail", "message"] {
            match map.get(key) {
                Some(serde_json::Value::String(s)) if !s.is_empty() => return s.clone(),
                Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) | None => {}
                Some(serde_json::Value::String(_)) => {}
                Some(other) => return other.to_string(),
            }
        }
    }

    let reason = status.canonical_reason().unwrap_or("");
    format!("API Error: {} {}", status.as_u16(), reason)
        .trim_end()
        .to_string()
}
