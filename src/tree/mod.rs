//! Namespace tree: nodes, name rules and the arena that owns them.

mod arena;
pub mod name;
pub mod node;

pub use arena::Tree;
pub use name::{validate_name, SEPARATOR};
pub use node::{DirectoryNode, FileNode, Node, NodeKind};
