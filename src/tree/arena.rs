//! Node arena and tree mutations.
//!
//! All nodes live in a slot vector and are referenced by `NodeId`. Directories
//! own their children through their `files` / `subdirectories` lists; a node's
//! `parent` is only a handle back into the arena, so the tree never forms a
//! reference cycle.

use super::name::{validate_name, SEPARATOR};
use super::node::{DirectoryNode, Node, NodeKind};
use crate::error::NamespaceError;
use crate::types::{NodeId, Timestamp};

/// Arena-backed directory tree with a single root.
#[derive(Debug, Clone)]
pub struct Tree {
    slots: Vec<Option<Node>>,
    root: NodeId,
    live: usize,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Tree holding only an empty root directory.
    pub fn new() -> Self {
        Self {
            slots: vec![Some(Node::directory(String::new(), None))],
            root: NodeId(0),
            live: 1,
        }
    }

    /// Tree whose root carries timestamps restored from a snapshot.
    pub(crate) fn with_root_times(created: Timestamp, modified: Timestamp) -> Self {
        let root = Node::restored(
            String::new(),
            None,
            NodeKind::Directory(DirectoryNode::default()),
            created,
            modified,
        );
        Self {
            slots: vec![Some(root)],
            root: NodeId(0),
            live: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.live
    }

    /// A tree always holds its root.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Look up a node; `None` for deleted or unknown handles.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Borrow a live node.
    ///
    /// Panics if the handle is stale. Only the engine calls this, with
    /// handles it has just resolved.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale node handle {:?}", id),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.slots.get_mut(id.0).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("stale node handle {:?}", id),
        }
    }

    pub fn directory(&self, id: NodeId) -> Option<&DirectoryNode> {
        self.get(id).and_then(Node::as_directory)
    }

    /// Absolute path of a node; `None` for deleted or unknown handles.
    pub fn path(&self, id: NodeId) -> Option<String> {
        self.contains(id).then(|| self.live_path(id))
    }

    /// Absolute path of a live node, computed from the live tree.
    pub(crate) fn live_path(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            if node.parent.is_some() {
                names.push(node.name.as_str());
            }
            current = node.parent;
        }
        if names.is_empty() {
            return SEPARATOR.to_string();
        }
        let mut path = String::new();
        for name in names.iter().rev() {
            path.push(SEPARATOR);
            path.push_str(name);
        }
        path
    }

    /// Child of `dir` with the given name, of either kind.
    pub fn child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.children(dir).find(|&id| self.node(id).name == name)
    }

    pub fn subdirectory(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.directory(dir)?
            .subdirectories
            .iter()
            .copied()
            .find(|&id| self.node(id).name == name)
    }

    pub fn file(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.directory(dir)?
            .files
            .iter()
            .copied()
            .find(|&id| self.node(id).name == name)
    }

    /// Children of a directory, files first. Empty for files.
    pub fn children(&self, dir: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.directory(dir).into_iter().flat_map(DirectoryNode::children)
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ancestor {
                return true;
            }
            current = self.get(node_id).and_then(Node::parent);
        }
        false
    }

    /// Pre-order walk from `start`: every node precedes its children.
    pub fn descendants(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            order.push(id);
            let children: Vec<NodeId> = self.children(id).collect();
            stack.extend(children.into_iter().rev());
        }
        order
    }

    pub(crate) fn create_directory(&mut self, parent: NodeId, name: &str) -> Result<NodeId, NamespaceError> {
        self.create(parent, Node::directory(name.to_string(), None))
    }

    pub(crate) fn create_file(&mut self, parent: NodeId, name: &str) -> Result<NodeId, NamespaceError> {
        self.create(parent, Node::file(name.to_string(), None))
    }

    fn create(&mut self, parent: NodeId, node: Node) -> Result<NodeId, NamespaceError> {
        validate_name(&node.name)?;
        self.check_attachable(parent, &node.name, None)?;
        let id = self.allocate(node);
        self.link(parent, id);
        Ok(id)
    }

    /// Insert a node read back from a snapshot without touching timestamps.
    pub(crate) fn restore_child(
        &mut self,
        parent: NodeId,
        name: &str,
        kind: NodeKind,
        created: Timestamp,
        modified: Timestamp,
    ) -> Result<NodeId, NamespaceError> {
        validate_name(name)?;
        self.check_attachable(parent, name, None)?;
        let id = self.allocate(Node::restored(name.to_string(), Some(parent), kind, created, modified));
        self.push_child(parent, id);
        Ok(id)
    }

    /// Attach `file` to `dir`, detaching it from its previous directory.
    pub(crate) fn add_file(&mut self, dir: NodeId, file: NodeId) -> Result<(), NamespaceError> {
        if !self.node(file).is_file() {
            return Err(NamespaceError::IsADirectory(self.live_path(file)));
        }
        self.attach(dir, file)
    }

    /// Attach `child` directory to `dir`, detaching it from its previous
    /// directory. Refuses moves that would put a directory inside itself.
    pub(crate) fn add_subdirectory(&mut self, dir: NodeId, child: NodeId) -> Result<(), NamespaceError> {
        if !self.node(child).is_directory() {
            return Err(NamespaceError::NotADirectory(self.live_path(child)));
        }
        if self.is_ancestor(child, dir) {
            return Err(NamespaceError::MoveIntoSelf(self.live_path(child)));
        }
        self.attach(dir, child)
    }

    fn attach(&mut self, dir: NodeId, child: NodeId) -> Result<(), NamespaceError> {
        let previous = self.node(child).parent;
        if previous == Some(dir) {
            return Ok(());
        }
        let name = self.node(child).name.clone();
        self.check_attachable(dir, &name, Some(child))?;

        if let Some(previous) = previous {
            self.unlink(previous, child);
        }
        self.link(dir, child);
        Ok(())
    }

    /// `dir` must be a directory without a child called `name` (other than
    /// `except`).
    fn check_attachable(
        &self,
        dir: NodeId,
        name: &str,
        except: Option<NodeId>,
    ) -> Result<(), NamespaceError> {
        if self.directory(dir).is_none() {
            return Err(NamespaceError::NotADirectory(self.live_path(dir)));
        }
        match self.child(dir, name) {
            Some(existing) if Some(existing) != except => {
                Err(NamespaceError::AlreadyExists(name.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Rename a node, keeping names unique among its siblings.
    pub(crate) fn rename(&mut self, id: NodeId, new_name: &str) -> Result<(), NamespaceError> {
        let parent = self.node(id).parent.ok_or(NamespaceError::RootRename)?;
        validate_name(new_name)?;
        if self.node(id).name == new_name {
            self.node_mut(id).touch();
            return Ok(());
        }
        self.check_attachable(parent, new_name, Some(id))?;

        let node = self.node_mut(id);
        node.name = new_name.to_string();
        node.touch();
        self.node_mut(parent).touch();
        Ok(())
    }

    /// Delete a node. Directories must be empty; the root is never deleted.
    pub(crate) fn delete(&mut self, id: NodeId) -> Result<(), NamespaceError> {
        let node = self.node(id);
        let parent = node.parent.ok_or(NamespaceError::RootDeletion)?;
        if let Some(dir) = node.as_directory() {
            if !dir.is_empty() {
                return Err(NamespaceError::DirectoryNotEmpty(node.name.clone()));
            }
        }

        self.unlink(parent, id);
        self.slots[id.0] = None;
        self.live -= 1;
        Ok(())
    }

    pub(crate) fn read(&self, id: NodeId) -> Result<&str, NamespaceError> {
        self.node(id)
            .as_file()
            .map(|file| file.content())
            .ok_or_else(|| NamespaceError::IsADirectory(self.live_path(id)))
    }

    /// Replace a file's content.
    pub(crate) fn write(&mut self, id: NodeId, content: &str) -> Result<(), NamespaceError> {
        self.update_file(id, |buffer| {
            buffer.clear();
            buffer.push_str(content);
        })
    }

    /// Append to a file's content.
    pub(crate) fn append(&mut self, id: NodeId, content: &str) -> Result<(), NamespaceError> {
        self.update_file(id, |buffer| buffer.push_str(content))
    }

    fn update_file<F>(&mut self, id: NodeId, update: F) -> Result<(), NamespaceError>
    where
        F: FnOnce(&mut String),
    {
        if !self.node(id).is_file() {
            return Err(NamespaceError::IsADirectory(self.live_path(id)));
        }
        let node = self.node_mut(id);
        if let Some(file) = node.as_file_mut() {
            update(&mut file.content);
        }
        node.touch();
        Ok(())
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Some(node));
        self.live += 1;
        id
    }

    /// Set `child`'s parent to `dir`, append it to the matching list and bump
    /// the directory's modified time.
    fn link(&mut self, dir: NodeId, child: NodeId) {
        self.node_mut(child).parent = Some(dir);
        self.push_child(dir, child);
        self.node_mut(dir).touch();
    }

    fn push_child(&mut self, dir: NodeId, child: NodeId) {
        let is_directory = self.node(child).is_directory();
        if let Some(entries) = self.node_mut(dir).as_directory_mut() {
            if is_directory {
                entries.subdirectories.push(child);
            } else {
                entries.files.push(child);
            }
        }
    }

    fn unlink(&mut self, dir: NodeId, child: NodeId) {
        let parent = self.node_mut(dir);
        if let Some(entries) = parent.as_directory_mut() {
            entries.files.retain(|&id| id != child);
            entries.subdirectories.retain(|&id| id != child);
        }
        parent.touch();
        self.node_mut(child).parent = None;
    }
}
