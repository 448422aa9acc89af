//! StorageConfig and resolve_paths for snapshot files.

use crate::config::paths::xdg_root;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_true() -> bool {
    true
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Binary snapshot path; `None` means the platform data directory
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// JSON mirror path; `None` means next to the default snapshot
    #[serde(default)]
    pub mirror_path: Option<PathBuf>,

    /// Save the namespace when the shell exits (default: true)
    #[serde(default = "default_true")]
    pub save_on_exit: bool,

    /// Write the JSON mirror alongside the snapshot (default: true)
    #[serde(default = "default_true")]
    pub write_mirror: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            mirror_path: None,
            save_on_exit: default_true(),
            write_mirror: default_true(),
        }
    }
}

impl StorageConfig {
    /// Resolve snapshot and mirror paths to actual filesystem locations.
    ///
    /// An explicit snapshot path without a mirror path puts the mirror next
    /// to it with a `.json` extension.
    pub fn resolve_paths(&self) -> Result<(PathBuf, PathBuf), ApiError> {
        let snapshot_path = match &self.snapshot_path {
            Some(path) => path.clone(),
            None => xdg_root::data_dir()?.join("shellfs.bin"),
        };
        let mirror_path = match &self.mirror_path {
            Some(path) => path.clone(),
            None => snapshot_path.with_extension("json"),
        };
        Ok((snapshot_path, mirror_path))
    }
}
