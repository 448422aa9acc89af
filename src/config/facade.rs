//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ShellConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file, an optional explicit file,
    /// and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<ShellConfig, ApiError> {
        Ok(MergeService::load(explicit)?)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<ShellConfig, ApiError> {
        Ok(MergeService::load_from_file(path)?)
    }

    /// Create default configuration.
    pub fn default() -> ShellConfig {
        ShellConfig::default()
    }
}
