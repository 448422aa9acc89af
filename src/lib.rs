//! shellfs: an in-memory hierarchical namespace
//!
//! Directories and text files live in an arena-backed tree that is driven by
//! a tiny interactive shell and persisted between sessions as a binary
//! snapshot with a JSON mirror.

pub mod config;
pub mod error;
pub mod logging;
pub mod namespace;
pub mod shell;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
