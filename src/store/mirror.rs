//! Nested JSON mirror of a snapshot, written next to it for inspection. It is
//! never read back.

use super::{NodeRecord, NodeType, Snapshot};
use serde::Serialize;
use std::collections::BTreeMap;

/// One node of the mirror, children keyed by name.
#[derive(Debug, Clone, Serialize)]
pub struct MirrorNode {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub created: String,
    pub modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, MirrorNode>,
}

impl From<&NodeRecord> for MirrorNode {
    fn from(record: &NodeRecord) -> Self {
        MirrorNode {
            node_type: record.node_type,
            created: record.created.clone(),
            modified: record.modified.clone(),
            content: record.content.clone(),
            children: BTreeMap::new(),
        }
    }
}

/// Mirror document
#[derive(Debug, Clone, Serialize)]
pub struct Mirror {
    pub cwd: String,
    pub root: MirrorNode,
}

impl Mirror {
    /// Nest the flat snapshot entries under their parents.
    ///
    /// Returns `None` when the snapshot has no root entry. Entries whose parent
    /// is missing are left out.
    pub fn from_snapshot(snapshot: &Snapshot) -> Option<Self> {
        let mut root = MirrorNode::from(snapshot.nodes.get("/")?);

        'entries: for (path, record) in snapshot.nodes.iter().filter(|(path, _)| *path != "/") {
            let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
            let Some((name, parents)) = segments.split_last() else {
                continue;
            };
            let mut current = &mut root;
            for segment in parents {
                current = match current.children.get_mut(*segment) {
                    Some(next) => next,
                    None => continue 'entries,
                };
            }
            current.children.insert(name.to_string(), MirrorNode::from(record));
        }

        Some(Mirror {
            cwd: snapshot.cwd.clone(),
            root,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
