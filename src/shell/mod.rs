//! Interactive shell: command parsing, prompt, and the read-eval-print loop.

pub mod command;
pub mod format;
pub mod prompt;
mod repl;

pub use command::{Command, Redirect};
pub use prompt::render_prompt;
pub use repl::{Flow, Shell};
