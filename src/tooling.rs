//! Tooling & Integration Layer
//!
//! Command-line surface around the shell: argument parsing, config overrides,
//! and the load-run-save session lifecycle.

pub mod cli;

pub use cli::{Cli, CliContext};
