//! Namespace node types

use crate::types::{next_after, now, NodeId, Timestamp};

/// Directory payload: child handles in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DirectoryNode {
    pub(crate) files: Vec<NodeId>,
    pub(crate) subdirectories: Vec<NodeId>,
}

impl DirectoryNode {
    pub fn files(&self) -> &[NodeId] {
        &self.files
    }

    pub fn subdirectories(&self) -> &[NodeId] {
        &self.subdirectories
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.subdirectories.is_empty()
    }

    /// Files first, then subdirectories.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.files.iter().chain(self.subdirectories.iter()).copied()
    }
}

/// File payload
#[derive(Debug, Clone, Default)]
pub struct FileNode {
    pub(crate) content: String,
}

impl FileNode {
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Node payload
#[derive(Debug, Clone)]
pub enum NodeKind {
    Directory(DirectoryNode),
    File(FileNode),
}

/// A namespace entry stored in the tree arena.
///
/// `parent` is a handle back into the arena; ownership flows from the
/// directory's child lists, never through this field.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    created: Timestamp,
    modified: Timestamp,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn new(name: String, parent: Option<NodeId>, kind: NodeKind) -> Self {
        let created = now();
        Self {
            name,
            parent,
            created,
            modified: created,
            kind,
        }
    }

    pub(crate) fn directory(name: String, parent: Option<NodeId>) -> Self {
        Self::new(name, parent, NodeKind::Directory(DirectoryNode::default()))
    }

    pub(crate) fn file(name: String, parent: Option<NodeId>) -> Self {
        Self::new(name, parent, NodeKind::File(FileNode::default()))
    }

    /// Node with timestamps taken from a snapshot
    pub(crate) fn restored(
        name: String,
        parent: Option<NodeId>,
        kind: NodeKind,
        created: Timestamp,
        modified: Timestamp,
    ) -> Self {
        Self {
            name,
            parent,
            created,
            modified,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn created(&self) -> Timestamp {
        self.created
    }

    pub fn modified(&self) -> Timestamp {
        self.modified
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory(_))
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File(_))
    }

    pub fn as_directory(&self) -> Option<&DirectoryNode> {
        match &self.kind {
            NodeKind::Directory(dir) => Some(dir),
            NodeKind::File(_) => None,
        }
    }

    pub(crate) fn as_directory_mut(&mut self) -> Option<&mut DirectoryNode> {
        match &mut self.kind {
            NodeKind::Directory(dir) => Some(dir),
            NodeKind::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match &self.kind {
            NodeKind::File(file) => Some(file),
            NodeKind::Directory(_) => None,
        }
    }

    pub(crate) fn as_file_mut(&mut self) -> Option<&mut FileNode> {
        match &mut self.kind {
            NodeKind::File(file) => Some(file),
            NodeKind::Directory(_) => None,
        }
    }

    /// Advance `modified`; always strictly increases it.
    pub(crate) fn touch(&mut self) {
        self.modified = next_after(self.modified);
    }
}
