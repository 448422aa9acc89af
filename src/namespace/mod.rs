//! Namespace engine
//!
//! Owns the directory tree, the current-directory cursor and the configured
//! home path. All shell commands and the snapshot store go through this type.

mod resolve;

pub use resolve::{is_home_relative, HOME_TOKEN};

use crate::error::NamespaceError;
use crate::tree::{validate_name, Node, Tree, SEPARATOR};
use crate::types::NodeId;
use resolve::Resolver;
use tracing::debug;

/// Result of `touch`: a new file, or the file that already had the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOutcome {
    Created(NodeId),
    Existing(NodeId),
}

impl TouchOutcome {
    pub fn id(self) -> NodeId {
        match self {
            TouchOutcome::Created(id) | TouchOutcome::Existing(id) => id,
        }
    }
}

/// In-memory namespace with a current directory.
#[derive(Debug, Clone)]
pub struct Namespace {
    tree: Tree,
    cursor: NodeId,
    home: String,
}

impl Namespace {
    /// Empty namespace (root only) with the cursor at the root.
    ///
    /// `home` must be an absolute path of valid names; it is created on first
    /// use, not here.
    pub fn new(home: impl Into<String>) -> Result<Self, NamespaceError> {
        Self::from_tree(Tree::new(), home)
    }

    /// Fresh namespace holding `dirs` and the home directory, cursor at home.
    pub fn bootstrap<S: AsRef<str>>(home: impl Into<String>, dirs: &[S]) -> Result<Self, NamespaceError> {
        let mut namespace = Self::new(home)?;
        for dir in dirs {
            namespace.mkdir_all(dir.as_ref())?;
        }
        namespace.cursor = namespace.ensure_home()?;
        debug!(home = %namespace.home, nodes = namespace.tree.len(), "Bootstrapped namespace");
        Ok(namespace)
    }

    pub(crate) fn from_tree(tree: Tree, home: impl Into<String>) -> Result<Self, NamespaceError> {
        let home = normalize_home(&home.into())?;
        let cursor = tree.root();
        Ok(Self { tree, cursor, home })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn cursor(&self) -> NodeId {
        self.cursor
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    /// Path of the current directory.
    pub fn cwd(&self) -> String {
        self.tree.live_path(self.cursor)
    }

    /// Path of a node; `None` once it has been deleted.
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        self.tree.path(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    /// Create a directory in the current directory.
    pub fn mkdir(&mut self, name: &str) -> Result<NodeId, NamespaceError> {
        let id = self.tree.create_directory(self.cursor, name)?;
        debug!(path = %self.tree.live_path(id), "Created directory");
        Ok(id)
    }

    /// Create an empty file in the current directory.
    ///
    /// An existing file with the same name is left as is.
    pub fn touch(&mut self, name: &str) -> Result<TouchOutcome, NamespaceError> {
        if let Some(existing) = self.tree.file(self.cursor, name) {
            return Ok(TouchOutcome::Existing(existing));
        }
        let id = self.tree.create_file(self.cursor, name)?;
        debug!(path = %self.tree.live_path(id), "Created file");
        Ok(TouchOutcome::Created(id))
    }

    /// Names in the current directory, files and directories together,
    /// sorted.
    pub fn ls(&self) -> impl Iterator<Item = &str> + '_ {
        let mut names: Vec<&str> = self
            .tree
            .children(self.cursor)
            .map(|id| self.tree.node(id).name())
            .collect();
        names.sort_unstable();
        names.into_iter()
    }

    /// Move the cursor to the directory at `path`.
    ///
    /// A leading `~` creates the home directory if it is missing. On failure
    /// the cursor does not move.
    pub fn cd(&mut self, path: &str) -> Result<NodeId, NamespaceError> {
        if is_home_relative(path) && self.find_directory(&self.home).is_err() {
            // Home is created only if the whole path then resolves.
            let mut staged = self.clone();
            staged.ensure_home()?;
            let target = staged.find_directory(path)?;
            *self = staged;
            self.cursor = target;
            debug!(cwd = %self.tree.live_path(target), "Created home and changed directory");
            return Ok(target);
        }
        let target = self.find_directory(path)?;
        self.cursor = target;
        debug!(cwd = %self.tree.live_path(target), "Changed directory");
        Ok(target)
    }

    /// Resolve `path` to a directory without moving the cursor.
    pub fn find_directory(&self, path: &str) -> Result<NodeId, NamespaceError> {
        self.resolver().directory(path)
    }

    /// Resolve `path` to a file.
    pub fn find_file(&self, path: &str) -> Result<NodeId, NamespaceError> {
        self.resolver().file(path)
    }

    /// Resolve `path` to a node of either kind.
    pub fn find(&self, path: &str) -> Result<NodeId, NamespaceError> {
        self.resolver().entry(path)
    }

    /// Delete the file or empty directory at `path` (usually a name in the
    /// current directory).
    ///
    /// Deleting the current directory itself moves the cursor to its parent.
    pub fn delete(&mut self, path: &str) -> Result<(), NamespaceError> {
        let id = self.find(path)?;
        let parent = self.tree.node(id).parent();
        let removed_path = self.tree.live_path(id);
        let holds_cursor = self.tree.is_ancestor(id, self.cursor);

        self.tree.delete(id)?;
        if holds_cursor {
            if let Some(parent) = parent {
                self.cursor = parent;
            }
        }
        debug!(path = %removed_path, "Deleted node");
        Ok(())
    }

    /// Rename the node at `path`; it stays in the same directory.
    pub fn rename(&mut self, path: &str, new_name: &str) -> Result<(), NamespaceError> {
        let id = self.find(path)?;
        self.tree.rename(id, new_name)?;
        debug!(path = %self.tree.live_path(id), "Renamed node");
        Ok(())
    }

    /// Move the node at `path` into the directory at `dest`.
    pub fn move_node(&mut self, path: &str, dest: &str) -> Result<NodeId, NamespaceError> {
        let id = self.find(path)?;
        let dir = self.find_directory(dest)?;
        if self.tree.node(id).is_directory() {
            self.tree.add_subdirectory(dir, id)?;
        } else {
            self.tree.add_file(dir, id)?;
        }
        debug!(path = %self.tree.live_path(id), "Moved node");
        Ok(id)
    }

    pub fn read(&self, path: &str) -> Result<&str, NamespaceError> {
        let id = self.find_file(path)?;
        self.tree.read(id)
    }

    /// Replace the content of the file at `path`.
    pub fn write(&mut self, path: &str, content: &str) -> Result<(), NamespaceError> {
        let id = self.find_file(path)?;
        self.tree.write(id, content)
    }

    /// Append to the file at `path`.
    pub fn append(&mut self, path: &str, content: &str) -> Result<(), NamespaceError> {
        let id = self.find_file(path)?;
        self.tree.append(id, content)
    }

    /// Create every missing directory along `path`.
    ///
    /// Relative paths start at the cursor. Fails with `NotADirectory` when a
    /// file sits on the way; nothing is created in that case.
    pub fn mkdir_all(&mut self, path: &str) -> Result<NodeId, NamespaceError> {
        let (mut current, rest) = match path.strip_prefix(SEPARATOR) {
            Some(rest) => (self.tree.root(), rest),
            None => (self.cursor, path),
        };
        let tokens: Vec<&str> = rest
            .split(SEPARATOR)
            .filter(|token| !token.is_empty() && *token != ".")
            .collect();

        let mut missing = Vec::new();
        for token in &tokens {
            if *token == ".." {
                if !missing.is_empty() {
                    return Err(NamespaceError::NoSuchPath(token.to_string()));
                }
                current = self.tree.node(current).parent().ok_or(NamespaceError::NoParent)?;
                continue;
            }
            if !missing.is_empty() {
                validate_name(token)?;
                missing.push(*token);
                continue;
            }
            match self.tree.subdirectory(current, token) {
                Some(dir) => current = dir,
                None => {
                    if let Some(file) = self.tree.file(current, token) {
                        return Err(NamespaceError::NotADirectory(self.tree.live_path(file)));
                    }
                    validate_name(token)?;
                    missing.push(*token);
                }
            }
        }

        for name in missing {
            current = self.tree.create_directory(current, name)?;
        }
        Ok(current)
    }

    /// Home directory, created if absent.
    pub fn ensure_home(&mut self) -> Result<NodeId, NamespaceError> {
        let home = self.home.clone();
        self.mkdir_all(&home)
    }

    /// Every live node with its path, parents before children.
    pub fn nodes(&self) -> impl Iterator<Item = (String, &Node)> + '_ {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .map(move |id| (self.tree.live_path(id), self.tree.node(id)))
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver {
            tree: &self.tree,
            cursor: self.cursor,
            home: &self.home,
        }
    }
}

/// Absolute home path in the form `Tree::path` produces: no empty segments,
/// no trailing separator.
fn normalize_home(home: &str) -> Result<String, NamespaceError> {
    let invalid = || NamespaceError::InvalidName(home.to_string());
    let rest = home.strip_prefix(SEPARATOR).ok_or_else(invalid)?;
    let mut normalized = String::new();
    for segment in rest.split(SEPARATOR).filter(|segment| !segment.is_empty()) {
        validate_name(segment).map_err(|_| invalid())?;
        normalized.push(SEPARATOR);
        normalized.push_str(segment);
    }
    if normalized.is_empty() {
        normalized.push(SEPARATOR);
    }
    Ok(normalized)
}
