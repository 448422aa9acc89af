//! Platform directory lookup for config, data and state files.

use crate::error::ApiError;
use crate::tree::validate_name;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Fallback when no usable user name is found in the environment.
pub const FALLBACK_USER: &str = "user";

fn project_dirs() -> Result<ProjectDirs, ApiError> {
    ProjectDirs::from("", "shellfs", "shellfs").ok_or_else(|| {
        ApiError::ConfigError("Could not determine project directories (HOME not set)".to_string())
    })
}

/// Get XDG config directory for shellfs
///
/// Returns `$XDG_CONFIG_HOME/shellfs` on Linux.
pub fn config_dir() -> Result<PathBuf, ApiError> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Path of the global config file, which need not exist.
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get XDG data directory for shellfs
///
/// Returns `$XDG_DATA_HOME/shellfs` on Linux. Snapshot files live here.
pub fn data_dir() -> Result<PathBuf, ApiError> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

/// State directory for log files; falls back to the data directory on
/// platforms without one.
pub fn state_dir() -> Result<PathBuf, ApiError> {
    let dirs = project_dirs()?;
    Ok(dirs
        .state_dir()
        .unwrap_or_else(|| dirs.data_dir())
        .to_path_buf())
}

/// Name of the invoking user from `USER` or `USERNAME`.
///
/// Values that are not valid node names fall back to [`FALLBACK_USER`].
pub fn current_user() -> String {
    ["USER", "USERNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|name| name.trim().to_string())
        .find(|name| validate_name(name).is_ok())
        .unwrap_or_else(|| FALLBACK_USER.to_string())
}
