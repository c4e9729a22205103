//! Locates and reads the TOML configuration file, then applies environment overrides.

use super::builder::ConfigBuilder;
use super::file::ConfigFile;
use crate::core::error::{AppError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the validation API base URL.
pub const API_URL_ENV: &str = "EMAIL_VALIDATOR_API_URL";

const LOCAL_CONFIG_NAME: &str = "email-dashboard.toml";

/// Candidate config locations, in search order, when no path is given.
fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_NAME)];
    if let Ok(home) = std::env::var("HOME") {
        paths.push(
            PathBuf::from(home)
                .join(".config")
                .join("email-dashboard")
                .join("config.toml"),
        );
    }
    paths
}

/// Reads and parses one config file.
pub(crate) fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    toml::from_str(&content).map_err(|e| {
        AppError::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Finds the config file to use.
///
/// An explicit path must exist. Without one, the first default location that
/// exists is used, and having none is fine.
pub(crate) fn locate_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(AppError::Config(format!(
                "Config file '{}' not found",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }
    Ok(default_config_paths().into_iter().find(|p| p.is_file()))
}

/// Applies environment overrides through `lookup` so callers (and tests) choose the source.
pub(crate) fn apply_env_overrides<F>(builder: ConfigBuilder, lookup: F) -> ConfigBuilder
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(API_URL_ENV) {
        Some(url) if !url.trim().is_empty() => {
            tracing::debug!("Using API base URL from {}", API_URL_ENV);
            builder.api_base_url(url)
        }
        _ => builder,
    }
}

/// Builds the file and environment layers; callers add flag overrides and call `build()`.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigBuilder> {
    let mut builder = ConfigBuilder::new();

    if let Some(path) = locate_config_file(explicit)? {
        tracing::info!("Loading configuration from {}", path.display());
        let file = read_config_file(&path)?;
        builder = builder.with_file(&file, Some(path.display().to_string()));
    } else {
        tracing::debug!("No configuration file found; using defaults");
    }

    Ok(apply_env_overrides(builder, |key| std::env::var(key).ok()))
}
