//! Node name validation.

use crate::error::NamespaceError;

/// Path separator used by the namespace.
pub const SEPARATOR: char = '/';

/// Validate a node name.
///
/// A name is non-empty, contains no separator and is not one of the
/// navigation tokens `.` / `..`.
pub fn validate_name(name: &str) -> Result<(), NamespaceError> {
    if name.is_empty() || name.contains(SEPARATOR) || name == "." || name == ".." {
        return Err(NamespaceError::InvalidName(name.to_string()));
    }
    Ok(())
}
