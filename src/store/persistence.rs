//! File-backed snapshot store: bincode snapshot plus JSON mirror.

use super::mirror::Mirror;
use super::{Snapshot, SnapshotStore};
use crate::error::StorageError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Snapshot store writing a binary snapshot and, optionally, a JSON mirror.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    snapshot_path: PathBuf,
    mirror_path: Option<PathBuf>,
}

impl FileSnapshotStore {
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            mirror_path: None,
        }
    }

    /// Also write the JSON mirror to `mirror_path` on every save.
    pub fn with_mirror(mut self, mirror_path: impl Into<PathBuf>) -> Self {
        self.mirror_path = Some(mirror_path.into());
        self
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn mirror_path(&self) -> Option<&Path> {
        self.mirror_path.as_deref()
    }

    fn write_mirror(&self, path: &Path, snapshot: &Snapshot) -> Result<(), StorageError> {
        let mirror = Mirror::from_snapshot(snapshot)
            .ok_or_else(|| StorageError::Encode("snapshot has no root entry".to_string()))?;
        let json = mirror
            .to_json()
            .map_err(|e| StorageError::Encode(format!("Failed to render JSON mirror: {}", e)))?;
        ensure_parent_dir(path)?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), "Wrote JSON mirror");
        Ok(())
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<Snapshot>, StorageError> {
        let bytes = match std::fs::read(&self.snapshot_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.snapshot_path.display(), "No snapshot on disk");
                return Ok(None);
            }
            Err(e) => return Err(StorageError::IoError(e)),
        };
        let snapshot: Snapshot = bincode::deserialize(&bytes).map_err(|e| {
            StorageError::Corrupt(format!(
                "Failed to decode {}: {}",
                self.snapshot_path.display(),
                e
            ))
        })?;
        Ok(Some(snapshot))
    }

    /// Write the snapshot through a temporary file and rename it into place,
    /// then refresh the mirror. A mirror failure is logged, not returned.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError> {
        let bytes = bincode::serialize(snapshot)
            .map_err(|e| StorageError::Encode(format!("Failed to encode snapshot: {}", e)))?;
        ensure_parent_dir(&self.snapshot_path)?;
        let temp_path = self.snapshot_path.with_extension("tmp");
        std::fs::write(&temp_path, bytes)?;
        std::fs::rename(&temp_path, &self.snapshot_path)?;
        debug!(path = %self.snapshot_path.display(), "Wrote snapshot");

        if let Some(mirror_path) = &self.mirror_path {
            if let Err(e) = self.write_mirror(mirror_path, snapshot) {
                warn!("Failed to write JSON mirror {}: {}", mirror_path.display(), e);
            }
        }
        Ok(())
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), StorageError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            Ok(())
        }
        _ => Ok(()),
    }
}
