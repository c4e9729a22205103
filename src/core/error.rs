//! Defines the custom error types for the email-dashboard application.

use std::io;
use thiserror::Error;
use url::ParseError as UrlParseError;

/// The primary error type for dashboard operations.
///
/// The `Display` output of every variant is the message shown to the user,
/// so variants that come from the backend carry the backend's own wording.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error occurring during configuration loading or validation.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error initializing necessary components (e.g., the HTTP client).
    #[error("Initialization Error: {0}")]
    Initialization(String),

    /// Error related to file input/output operations.
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    /// Error during JSON serialization or deserialization.
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error parsing a URL.
    #[error("URL Parsing Error: {0}")]
    UrlParse(#[from] UrlParseError),

    /// Transport-level failure talking to the API (connection refused, DNS, body decode).
    #[error("Network error - please check your connection ({0})")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    ///
    /// `message` is the body's `detail` or `message` field, or a
    /// status-derived fallback when neither is present.
    #[error("{message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Human-readable message extracted from the response.
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timeout - please try again")]
    Timeout,

    /// Input rejected locally before any request was made.
    #[error("{0}")]
    InvalidInput(String),

    /// An uploaded list file could not be accepted.
    #[error("Upload Error: {0}")]
    Upload(String),

    /// An underlying error that doesn't fit other categories, using anyhow.
    #[error("Generic Error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl AppError {
    /// Returns the HTTP status for API errors, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for the client-side timeout failure.
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Timeout)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
