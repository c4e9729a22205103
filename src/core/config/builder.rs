//! Builder that layers file values and explicit overrides on top of defaults.

use super::file::ConfigFile;
use super::validation::validate_config;
use super::Config;
use crate::core::error::{AppError, Result};
use std::time::Duration;
use url::Url;

/// Accumulates configuration layers and produces a validated [`Config`].
///
/// Later calls win, so apply the file first, then environment, then flags.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
    base_url_raw: Option<String>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies every value present in `file` over the current settings.
    pub fn with_file(mut self, file: &ConfigFile, path: Option<String>) -> Self {
        if let Some(url) = &file.api.base_url {
            self.base_url_raw = Some(url.clone());
        }
        if let Some(secs) = file.api.request_timeout {
            self.config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = &file.api.user_agent {
            self.config.user_agent = agent.clone();
        }
        if let Some(secs) = file.monitor.health_poll_interval {
            self.config.health_poll_interval = Duration::from_secs(secs);
        }
        if let Some(max) = file.upload.max_bulk_emails {
            self.config.max_bulk_emails = max;
        }
        if let Some(bytes) = file.upload.max_file_size {
            self.config.max_upload_bytes = bytes;
        }
        if let Some(rows) = file.display.max_table_rows {
            self.config.max_table_rows = rows;
        }
        if let Some(n) = file.display.preview_top_domains {
            self.config.preview_top_domains = n;
        }
        if let Some(n) = file.display.analytics_top_domains {
            self.config.analytics_top_domains = n;
        }
        if path.is_some() {
            self.config.loaded_config_path = path;
        }
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url_raw = Some(url.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn health_poll_interval(mut self, interval: Duration) -> Self {
        self.config.health_poll_interval = interval;
        self
    }

    pub fn max_bulk_emails(mut self, max: usize) -> Self {
        self.config.max_bulk_emails = max;
        self
    }

    pub fn max_upload_bytes(mut self, bytes: u64) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    pub fn max_table_rows(mut self, rows: usize) -> Self {
        self.config.max_table_rows = rows;
        self
    }

    /// Parses the base URL, validates every setting, and returns the config.
    pub fn build(mut self) -> Result<Config> {
        if let Some(raw) = self.base_url_raw.take() {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(AppError::Config("API base URL cannot be empty".into()));
            }
            self.config.api_base_url = Url::parse(trimmed).map_err(|e| {
                AppError::Config(format!("Invalid API base URL '{}': {}", trimmed, e))
            })?;
        }
        validate_config(&self.config)?;
        tracing::debug!("Built configuration: {:?}", self.config);
        Ok(self.config)
    }
}
