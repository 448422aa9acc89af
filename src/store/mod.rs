//! Snapshot Store
//!
//! Converts the namespace to and from a flat mapping of absolute path to node
//! record, the on-disk snapshot format. The tree itself is only ever rebuilt
//! from this mapping; nothing navigates it directly.

pub mod mirror;
pub mod persistence;

use crate::error::{ApiError, StorageError};
use crate::namespace::Namespace;
use crate::tree::{DirectoryNode, FileNode, NodeKind, Tree, SEPARATOR};
use crate::types::{NodeId, Timestamp};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

pub use persistence::FileSnapshotStore;

/// Snapshot format version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Dir,
    File,
}

/// NodeRecord: metadata (and file content) stored under a node's path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// ISO-8601 creation time
    pub created: String,
    /// ISO-8601 modification time
    pub modified: String,
    pub content: Option<String>,
}

/// Flat, path-keyed image of a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    /// Current directory at save time
    pub cwd: String,
    pub nodes: BTreeMap<String, NodeRecord>,
}

/// Snapshot store interface
pub trait SnapshotStore {
    /// Load the last saved snapshot; `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<Snapshot>, StorageError>;
    fn save(&self, snapshot: &Snapshot) -> Result<(), StorageError>;
}

pub fn format_timestamp(timestamp: Timestamp) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn parse_timestamp(value: &str) -> Result<Timestamp, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StorageError::Corrupt(format!("invalid timestamp '{}': {}", value, e)))
}

impl Snapshot {
    /// Capture every node of the namespace.
    pub fn capture(namespace: &Namespace) -> Self {
        let nodes = namespace
            .nodes()
            .map(|(path, node)| {
                let (node_type, content) = match node.kind() {
                    NodeKind::Directory(_) => (NodeType::Dir, None),
                    NodeKind::File(file) => (NodeType::File, Some(file.content().to_string())),
                };
                let record = NodeRecord {
                    node_type,
                    created: format_timestamp(node.created()),
                    modified: format_timestamp(node.modified()),
                    content,
                };
                (path, record)
            })
            .collect();

        Snapshot {
            version: SNAPSHOT_VERSION,
            cwd: namespace.cwd(),
            nodes,
        }
    }

    /// Rebuild a namespace from this snapshot.
    ///
    /// The home directory is created if the snapshot lacks it, and the cursor
    /// returns to the saved directory, or to home if that path no longer
    /// resolves.
    pub fn restore(self, home: &str) -> Result<Namespace, StorageError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(StorageError::Corrupt(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }

        let root_key = SEPARATOR.to_string();
        let root = self
            .nodes
            .get(&root_key)
            .ok_or_else(|| StorageError::Corrupt("snapshot has no root entry".to_string()))?;
        if root.node_type != NodeType::Dir {
            return Err(StorageError::Corrupt("root entry is not a directory".to_string()));
        }
        let mut tree = Tree::with_root_times(
            parse_timestamp(&root.created)?,
            parse_timestamp(&root.modified)?,
        );

        let mut ids: HashMap<&str, NodeId> = HashMap::new();
        ids.insert(root_key.as_str(), tree.root());

        // BTreeMap order puts every parent path before its children.
        for (path, record) in self.nodes.iter().filter(|(path, _)| **path != root_key) {
            let (parent_path, name) = split_path(path)?;
            let parent = *ids
                .get(parent_path)
                .ok_or_else(|| StorageError::Corrupt(format!("orphaned entry '{}'", path)))?;
            let kind = match record.node_type {
                NodeType::Dir => NodeKind::Directory(DirectoryNode::default()),
                NodeType::File => NodeKind::File(FileNode {
                    content: record.content.clone().unwrap_or_default(),
                }),
            };
            let id = tree
                .restore_child(
                    parent,
                    name,
                    kind,
                    parse_timestamp(&record.created)?,
                    parse_timestamp(&record.modified)?,
                )
                .map_err(|e| StorageError::Corrupt(format!("entry '{}': {}", path, e)))?;
            ids.insert(path.as_str(), id);
        }

        let mut namespace = Namespace::from_tree(tree, home)
            .map_err(|e| StorageError::Corrupt(format!("home '{}': {}", home, e)))?;
        namespace
            .ensure_home()
            .map_err(|e| StorageError::Corrupt(format!("home '{}': {}", home, e)))?;
        if namespace.cd(&self.cwd).is_err() {
            warn!(cwd = %self.cwd, "Saved directory no longer resolves, starting at home");
            let home_path = namespace.home().to_string();
            namespace
                .cd(&home_path)
                .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        }
        Ok(namespace)
    }
}

/// Split an absolute snapshot key into parent path and name.
fn split_path(path: &str) -> Result<(&str, &str), StorageError> {
    match path.rsplit_once(SEPARATOR) {
        Some(("", name)) => Ok(("/", name)),
        Some((parent, name)) if parent.starts_with(SEPARATOR) => Ok((parent, name)),
        _ => Err(StorageError::Corrupt(format!("entry '{}' is not an absolute path", path))),
    }
}

/// Load the saved namespace, bootstrapping a fresh one when no snapshot
/// exists. A corrupt snapshot is an error; the caller decides whether to fall
/// back.
pub fn load_namespace<S: AsRef<str>>(
    store: &dyn SnapshotStore,
    home: &str,
    bootstrap_dirs: &[S],
) -> Result<Namespace, ApiError> {
    match store.load()? {
        Some(snapshot) => {
            let entries = snapshot.nodes.len();
            let namespace = snapshot.restore(home)?;
            info!(entries, cwd = %namespace.cwd(), "Restored namespace from snapshot");
            Ok(namespace)
        }
        None => {
            info!("No snapshot found, bootstrapping a fresh namespace");
            Ok(Namespace::bootstrap(home, bootstrap_dirs)?)
        }
    }
}

/// Like [`load_namespace`], but any storage failure falls back to a fresh
/// namespace.
pub fn load_or_bootstrap<S: AsRef<str>>(
    store: &dyn SnapshotStore,
    home: &str,
    bootstrap_dirs: &[S],
) -> Result<Namespace, ApiError> {
    match load_namespace(store, home, bootstrap_dirs) {
        Ok(namespace) => Ok(namespace),
        Err(ApiError::StorageError(e)) => {
            warn!("Failed to load snapshot: {}, starting with a fresh namespace", e);
            Ok(Namespace::bootstrap(home, bootstrap_dirs)?)
        }
        Err(e) => Err(e),
    }
}

/// Capture and persist the namespace.
pub fn save_namespace(store: &dyn SnapshotStore, namespace: &Namespace) -> Result<(), ApiError> {
    let snapshot = Snapshot::capture(namespace);
    let entries = snapshot.nodes.len();
    store.save(&snapshot)?;
    info!(entries, "Saved namespace snapshot");
    Ok(())
}
