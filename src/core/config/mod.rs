//! Defines the core runtime `Config` struct, its defaults, and related utilities.
//! Submodules handle loading, building, and validation.

pub(crate) mod builder;
pub(crate) mod file;
pub(crate) mod loading;
pub(crate) mod validation;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;
pub use loading::{load_config, API_URL_ENV};

use std::time::Duration;
use url::Url;

/// Largest batch the validation API accepts in one bulk submission.
pub const API_MAX_BULK_EMAILS: usize = 10_000;

/// Runtime configuration settings used by the dashboard.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: Url,
    pub request_timeout: Duration,
    pub user_agent: String,

    pub health_poll_interval: Duration,

    pub max_bulk_emails: usize,
    pub max_upload_bytes: u64,

    pub max_table_rows: usize,
    pub preview_top_domains: usize,
    pub analytics_top_domains: usize,

    pub loaded_config_path: Option<String>,
}

impl Config {
    fn build_default() -> Self {
        let api_base_url = Url::parse("http://localhost:8000")
            .expect("Default API base URL failed to parse. This is a bug.");

        Config {
            api_base_url,
            request_timeout: Duration::from_secs(30),
            user_agent: format!("email-dashboard/{}", env!("CARGO_PKG_VERSION")),
            health_poll_interval: Duration::from_secs(30),
            max_bulk_emails: API_MAX_BULK_EMAILS,
            max_upload_bytes: 10 * 1024 * 1024,
            max_table_rows: 100,
            preview_top_domains: 5,
            analytics_top_domains: 10,
            loaded_config_path: None,
        }
    }

    /// Joins an endpoint path onto the API base URL.
    ///
    /// The base URL's own path is kept, so `http://host/api` + `/health`
    /// yields `http://host/api/health`.
    pub fn endpoint_url(&self, path: &str) -> crate::core::error::Result<Url> {
        let base = self.api_base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path))?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::build_default()
    }
}
