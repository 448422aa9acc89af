//! Path resolution against the live tree.
//!
//! Paths are split on `/`. A leading `/` starts at the root, a leading `~`
//! token at the home directory, anything else at the cursor. `.` and empty
//! segments stay put, `..` climbs one level and fails at the root; every
//! other segment must name a subdirectory. Resolution never creates nodes.

use crate::error::NamespaceError;
use crate::tree::{Tree, SEPARATOR};
use crate::types::NodeId;

/// Token that addresses the home directory when it leads a path.
pub const HOME_TOKEN: &str = "~";

/// Whether `path` starts from the home directory.
pub fn is_home_relative(path: &str) -> bool {
    let first = path.split(SEPARATOR).next().unwrap_or_default();
    first == HOME_TOKEN
}

pub(crate) struct Resolver<'a> {
    pub(crate) tree: &'a Tree,
    pub(crate) cursor: NodeId,
    pub(crate) home: &'a str,
}

impl<'a> Resolver<'a> {
    /// Resolve `path` to a directory.
    pub(crate) fn directory(&self, path: &str) -> Result<NodeId, NamespaceError> {
        let (start, rest) = self.start(path)?;
        rest.split(SEPARATOR)
            .try_fold(start, |current, token| self.step(current, token, path))
    }

    /// Resolve `path` to a file: the parent part must be a directory and the
    /// last segment must name a file in it.
    pub(crate) fn file(&self, path: &str) -> Result<NodeId, NamespaceError> {
        let (dir, name) = self.split_parent(path)?;
        match name {
            "" => Err(NamespaceError::NoSuchPath(path.to_string())),
            "." | ".." => Err(NamespaceError::IsADirectory(path.to_string())),
            name => {
                if let Some(file) = self.tree.file(dir, name) {
                    Ok(file)
                } else if self.tree.subdirectory(dir, name).is_some() {
                    Err(NamespaceError::IsADirectory(path.to_string()))
                } else {
                    Err(NamespaceError::NoSuchPath(name.to_string()))
                }
            }
        }
    }

    /// Resolve `path` to a node of either kind.
    pub(crate) fn entry(&self, path: &str) -> Result<NodeId, NamespaceError> {
        let (dir, name) = self.split_parent(path)?;
        match name {
            "" | "." | ".." => self.directory(path),
            _ if path == HOME_TOKEN => self.directory(path),
            name => self
                .tree
                .child(dir, name)
                .ok_or_else(|| NamespaceError::NoSuchPath(name.to_string())),
        }
    }

    /// Directory holding the last segment of `path`, and that segment.
    fn split_parent<'p>(&self, path: &'p str) -> Result<(NodeId, &'p str), NamespaceError> {
        match path.rsplit_once(SEPARATOR) {
            Some(("", name)) => Ok((self.tree.root(), name)),
            Some((parent, name)) => Ok((self.directory(parent)?, name)),
            None => Ok((self.cursor, path)),
        }
    }

    fn start<'p>(&self, path: &'p str) -> Result<(NodeId, &'p str), NamespaceError> {
        if let Some(rest) = path.strip_prefix(SEPARATOR) {
            return Ok((self.tree.root(), rest));
        }
        let (first, rest) = path.split_once(SEPARATOR).unwrap_or((path, ""));
        if first == HOME_TOKEN {
            return Ok((self.home_directory()?, rest));
        }
        Ok((self.cursor, path))
    }

    fn home_directory(&self) -> Result<NodeId, NamespaceError> {
        if !self.home.starts_with(SEPARATOR) {
            return Err(NamespaceError::NoSuchPath(self.home.to_string()));
        }
        self.directory(self.home)
            .map_err(|_| NamespaceError::NoSuchPath(self.home.to_string()))
    }

    fn step(&self, current: NodeId, token: &str, path: &str) -> Result<NodeId, NamespaceError> {
        match token {
            "" | "." => Ok(current),
            ".." => self.tree.node(current).parent().ok_or(NamespaceError::NoParent),
            name => {
                if let Some(dir) = self.tree.subdirectory(current, name) {
                    Ok(dir)
                } else if self.tree.file(current, name).is_some() {
                    Err(NamespaceError::NotADirectory(path.to_string()))
                } else {
                    Err(NamespaceError::NoSuchPath(name.to_string()))
                }
            }
        }
    }
}
