//! Configuration
//!
//! `ShellConfig` is assembled from serde defaults, the global config file,
//! an optional explicit file and `SHELLFS__*` environment variables, in that
//! order of precedence (lowest first). CLI flags are applied on top by the
//! caller.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod storage_paths;

pub use facade::ConfigLoader;
pub use storage_paths::StorageConfig;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Directories created in a fresh namespace besides the home directory.
pub fn default_bootstrap_dirs() -> Vec<String> {
    ["/usr", "/bin", "/home", "/lib", "/tmp", "/etc"]
        .iter()
        .map(|dir| dir.to_string())
        .collect()
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// User name for the default home directory; defaults to the invoking user.
    #[serde(default)]
    pub user: Option<String>,

    /// Absolute namespace path of the home directory (default `/home/<user>`)
    #[serde(default)]
    pub home: Option<String>,

    /// Directories created when no snapshot exists
    #[serde(default = "default_bootstrap_dirs")]
    pub bootstrap_dirs: Vec<String>,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: None,
            home: None,
            bootstrap_dirs: default_bootstrap_dirs(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Configured user, or the invoking user.
    pub fn user_name(&self) -> String {
        self.user
            .clone()
            .filter(|user| !user.trim().is_empty())
            .unwrap_or_else(paths::current_user)
    }

    /// Namespace path of the home directory.
    pub fn home_path(&self) -> String {
        match &self.home {
            Some(home) if !home.trim().is_empty() => home.clone(),
            _ => format!("/home/{}", self.user_name()),
        }
    }
}
