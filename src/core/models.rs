//! Defines the data structures exchanged with the validation API.
//!
//! The backend owns these shapes. The dashboard deserializes, filters, and
//! renders them but never recomputes their fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Backend-assigned fraud/spam likelihood for one address.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[serde(alias = "Low", alias = "LOW")]
    Low,
    #[serde(alias = "Medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "High", alias = "HIGH")]
    High,
    /// Any label the dashboard does not recognize.
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of validating a single email address.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub email: String,
    /// Overall verdict combining the individual checks.
    pub is_valid: bool,
    pub syntax_valid: bool,
    pub domain_valid: bool,
    /// `None` when the SMTP check was skipped or inconclusive.
    pub smtp_valid: Option<bool>,
    pub risk_level: RiskLevel,
    pub is_disposable: bool,
    pub is_role_based: bool,
    /// True when the address appears in a known breach.
    pub breach_status: bool,
    pub domain: String,
    /// Mail provider label, e.g. "gmail".
    pub provider: String,
}

/// The legacy `/validate` response: `{email, status}` plus optional detail fields.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LegacyValidationResponse {
    pub email: String,
    /// Empty when the backend answered with the full result shape.
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syntax_valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smtp_valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_disposable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_role_based: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breach_status: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl LegacyValidationResponse {
    /// The backend's status label, or one derived from `is_valid` when absent.
    pub fn status_label(&self) -> &str {
        if !self.status.trim().is_empty() {
            return &self.status;
        }
        match self.is_valid {
            Some(true) => "Valid",
            Some(false) => "Invalid",
            None => "Unknown",
        }
    }
}

/// Body of `POST /validate`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ValidationRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_smtp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_disposable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_breach: Option<bool>,
}

impl ValidationRequest {
    /// A request with every optional check enabled, matching the validation form defaults.
    pub fn full(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            check_smtp: Some(true),
            check_disposable: Some(true),
            check_breach: Some(true),
        }
    }

    /// The legacy request shape: email plus an explicit SMTP flag only.
    pub fn legacy(email: impl Into<String>, check_smtp: bool) -> Self {
        Self {
            email: email.into(),
            check_smtp: Some(check_smtp),
            check_disposable: None,
            check_breach: None,
        }
    }
}

/// Body of `POST /validate/bulk`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BulkValidationRequest {
    pub emails: Vec<String>,
}

/// Response of `POST /validate/bulk`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BulkSubmission {
    pub batch_id: String,
}

/// A bulk-submitted collection of emails tracked under one identifier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BulkValidationResult {
    pub batch_id: String,
    pub total_emails: u64,
    pub processed: u64,
    pub valid_count: u64,
    pub invalid_count: u64,
    #[serde(default)]
    pub results: Vec<ValidationResult>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    pub filename: String,
}

impl BulkValidationResult {
    pub fn is_complete(&self) -> bool {
        self.processed == self.total_emails
    }

    /// First eight characters of the batch id, as shown in listings.
    pub fn short_id(&self) -> &str {
        match self.batch_id.char_indices().nth(8) {
            Some((idx, _)) => &self.batch_id[..idx],
            None => &self.batch_id,
        }
    }
}

/// Batch timestamps arrive either as RFC 3339 or as offset-less ISO 8601,
/// which is read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("unrecognized timestamp '{}'", raw)))
    }
}

/// One point of the daily validation volume series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DailyVolume {
    pub date: String,
    pub count: u64,
}

/// Aggregate statistics returned by `GET /analytics`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyticsSummary {
    pub total_processed: u64,
    pub valid_percentage: f64,
    pub invalid_percentage: f64,
    pub disposable_percentage: f64,
    pub role_based_percentage: f64,
    #[serde(default)]
    pub domain_distribution: HashMap<String, u64>,
    #[serde(default)]
    pub daily_volume: Vec<DailyVolume>,
}

/// Response of `GET /health`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}
