//! Defines the structure mirroring the TOML configuration file format.

use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub(crate) api: ApiConfig,
    #[serde(default)]
    pub(crate) monitor: MonitorConfig,
    #[serde(default)]
    pub(crate) upload: UploadConfig,
    #[serde(default)]
    pub(crate) display: DisplayConfig,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ApiConfig {
    pub(crate) base_url: Option<String>,
    /// Seconds.
    pub(crate) request_timeout: Option<u64>,
    pub(crate) user_agent: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct MonitorConfig {
    /// Seconds between `/health` polls.
    pub(crate) health_poll_interval: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct UploadConfig {
    pub(crate) max_bulk_emails: Option<usize>,
    /// Bytes.
    pub(crate) max_file_size: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct DisplayConfig {
    pub(crate) max_table_rows: Option<usize>,
    pub(crate) preview_top_domains: Option<usize>,
    pub(crate) analytics_top_domains: Option<usize>,
}
