//! Sanity checks applied to a fully-layered [`Config`].

use super::{Config, API_MAX_BULK_EMAILS};
use crate::core::error::{AppError, Result};
use std::time::Duration;

const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

pub(crate) fn validate_config(config: &Config) -> Result<()> {
    match config.api_base_url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AppError::Config(format!(
                "API base URL must use http or https, got '{}'",
                other
            )))
        }
    }

    if config.request_timeout.is_zero() {
        return Err(AppError::Config(
            "request_timeout must be greater than zero".into(),
        ));
    }
    if config.request_timeout > MAX_REQUEST_TIMEOUT {
        return Err(AppError::Config(format!(
            "request_timeout must be at most {} seconds",
            MAX_REQUEST_TIMEOUT.as_secs()
        )));
    }

    if config.health_poll_interval < Duration::from_secs(1) {
        return Err(AppError::Config(
            "health_poll_interval must be at least 1 second".into(),
        ));
    }

    if config.max_bulk_emails == 0 || config.max_bulk_emails > API_MAX_BULK_EMAILS {
        return Err(AppError::Config(format!(
            "max_bulk_emails must be between 1 and {}",
            API_MAX_BULK_EMAILS
        )));
    }

    if config.max_upload_bytes == 0 {
        return Err(AppError::Config(
            "max_file_size must be greater than zero".into(),
        ));
    }

    if config.max_table_rows == 0 {
        return Err(AppError::Config(
            "max_table_rows must be greater than zero".into(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        tracing::warn!("Configured user agent is empty; requests will carry a blank User-Agent");
    }

    Ok(())
}
