//! Core library for email-dashboard: a client for an email validation API
//! together with list preprocessing, result filtering, and terminal views.

pub mod analytics;
pub mod api;
pub mod core;
pub mod results;
pub mod service;
pub mod ui;
pub mod upload;
pub mod utils;

pub use crate::api::ApiClient;
pub use crate::core::config::{Config, ConfigBuilder};
pub use crate::core::error::{AppError, Result};
pub use crate::core::models::{
    AnalyticsSummary, BulkSubmission, BulkValidationResult, HealthStatus,
    LegacyValidationResponse, RiskLevel, ValidationRequest, ValidationResult,
};
