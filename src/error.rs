//! Error types for the namespace engine, the snapshot store and the shell.

use thiserror::Error;

/// Failures reported by namespace operations.
///
/// Every variant leaves the tree unchanged: operations validate before they
/// mutate anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceError {
    #[error("invalid name '{0}'")]
    InvalidName(String),

    #[error("'{0}': File exists")]
    AlreadyExists(String),

    #[error("'{0}': No such file or directory")]
    NoSuchPath(String),

    #[error("'{0}': Not a directory")]
    NotADirectory(String),

    #[error("'{0}': Is a directory")]
    IsADirectory(String),

    #[error("root directory has no parent")]
    NoParent,

    #[error("'{0}': Directory not empty")]
    DirectoryNotEmpty(String),

    #[error("cannot remove the root directory")]
    RootDeletion,

    #[error("cannot rename the root directory")]
    RootRename,

    #[error("cannot move '{0}' into itself")]
    MoveIntoSelf(String),
}

impl NamespaceError {
    /// Short shell-style description, without the offending name.
    pub fn reason(&self) -> &'static str {
        match self {
            NamespaceError::InvalidName(_) => "Invalid name",
            NamespaceError::AlreadyExists(_) => "File exists",
            NamespaceError::NoSuchPath(_) => "No such file or directory",
            NamespaceError::NotADirectory(_) => "Not a directory",
            NamespaceError::IsADirectory(_) => "Is a directory",
            NamespaceError::NoParent => "No parent directory",
            NamespaceError::DirectoryNotEmpty(_) => "Directory not empty",
            NamespaceError::RootDeletion => "Cannot remove the root directory",
            NamespaceError::RootRename => "Cannot rename the root directory",
            NamespaceError::MoveIntoSelf(_) => "Cannot move a directory into itself",
        }
    }
}

/// Snapshot store errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to encode snapshot: {0}")]
    Encode(String),

    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),
}

/// Top-level error surfaced to the CLI and shell.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("{0}")]
    Command(String),

    /// Reading commands or writing shell output failed.
    #[error("Shell I/O error: {0}")]
    ShellIo(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
