//! Read-eval-print loop over a namespace.
//!
//! Output goes to a caller-supplied writer so the loop runs the same against
//! a terminal or an in-memory buffer. A failing command prints a diagnostic
//! and the loop carries on; only I/O errors on the writer end it.

use super::command::{Command, Redirect};
use super::format::format_namespace_table;
use super::prompt::render_prompt;
use crate::error::{ApiError, NamespaceError};
use crate::namespace::{Namespace, TouchOutcome};
use std::borrow::Cow;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

const HELP: &str = "\
Commands:
  ls | ll                  list the current directory
  mkdir <name>...          create directories
  touch <name>...          create empty files
  cd [path]                change directory (no path: home)
  echo <text> [>>|> file]  log text, or append/write it to a file
  cat <path>...            print file contents
  rm <path>...             remove files or empty directories
  mv <src> <dest>          move into a directory, or rename
  pwd                      print the current directory
  debug | d                dump the whole namespace
  help                     show this help
  exit | e | x             save and quit";

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive shell bound to one namespace and one output sink.
pub struct Shell<W: Write> {
    namespace: Namespace,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(namespace: Namespace, out: W) -> Self {
        Self { namespace, out }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn namespace_mut(&mut self) -> &mut Namespace {
        &mut self.namespace
    }

    pub fn into_parts(self) -> (Namespace, W) {
        (self.namespace, self.out)
    }

    pub fn prompt(&self) -> String {
        render_prompt(&self.namespace.cwd(), self.namespace.home())
    }

    /// Read lines until an exit command or end of input.
    ///
    /// With `show_prompt` the prompt is written before every line.
    pub fn run<R: BufRead>(&mut self, mut input: R, show_prompt: bool) -> Result<(), ApiError> {
        let mut buffer = Vec::new();
        loop {
            if show_prompt {
                write!(self.out, "{}", self.prompt())?;
                self.out.flush()?;
            }
            buffer.clear();
            let read = input.read_until(b'\n', &mut buffer)?;
            if read == 0 {
                if show_prompt {
                    writeln!(self.out)?;
                }
                debug!("End of input");
                return Ok(());
            }
            let line = String::from_utf8_lossy(&buffer);
            if let Cow::Owned(_) = line {
                warn!("Input line is not valid UTF-8, replacing invalid bytes");
            }
            if self.execute(&line)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Run a single line.
    pub fn execute(&mut self, line: &str) -> Result<Flow, ApiError> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(ApiError::Command(msg)) => {
                self.say(&msg)?;
                return Ok(Flow::Continue);
            }
            Err(e) => return Err(e),
        };
        if command != Command::Empty {
            debug!(command = command.name(), "Executing command");
        }

        match command {
            Command::Empty => {}
            Command::Exit => return Ok(Flow::Exit),
            Command::Ls => {
                let names: Vec<String> = self.namespace.ls().map(str::to_string).collect();
                for name in names {
                    self.say(&name)?;
                }
            }
            Command::Mkdir(names) => {
                for name in names {
                    if let Err(e) = self.namespace.mkdir(&name) {
                        self.say(&format!(
                            "mkdir: cannot create directory '{}': {}",
                            name,
                            e.reason()
                        ))?;
                    }
                }
            }
            Command::Touch(names) => {
                for name in names {
                    match self.namespace.touch(&name) {
                        Ok(TouchOutcome::Created(_)) => {}
                        Ok(TouchOutcome::Existing(_)) => {
                            warn!("touch: '{}' already exists, leaving it unchanged", name);
                        }
                        Err(e) => self.say(&format!(
                            "touch: cannot touch '{}': {}",
                            name,
                            e.reason()
                        ))?,
                    }
                }
            }
            Command::Cd(path) => {
                let path = path.unwrap_or_else(|| crate::namespace::HOME_TOKEN.to_string());
                if let Err(e) = self.namespace.cd(&path) {
                    self.say(&format!("cd: '{}': {}", path, e.reason()))?;
                }
            }
            Command::Echo { text, redirect } => self.echo(text, redirect)?,
            Command::Cat(paths) => {
                for path in paths {
                    match self.namespace.read(&path) {
                        Ok(content) => {
                            let content = content.to_string();
                            self.say(&content)?;
                        }
                        Err(e) => self.say(&format!("cat: '{}': {}", path, e.reason()))?,
                    }
                }
            }
            Command::Rm(paths) => {
                for path in paths {
                    if let Err(e) = self.namespace.delete(&path) {
                        self.say(&format!("rm: cannot remove '{}': {}", path, e.reason()))?;
                    }
                }
            }
            Command::Mv { source, dest } => {
                if let Err(e) = self.move_or_rename(&source, &dest) {
                    self.say(&format!(
                        "mv: cannot move '{}' to '{}': {}",
                        source,
                        dest,
                        e.reason()
                    ))?;
                }
            }
            Command::Pwd => {
                let cwd = self.namespace.cwd();
                self.say(&cwd)?;
            }
            Command::Debug => {
                let table = format_namespace_table(&self.namespace);
                write!(self.out, "{}", table)?;
            }
            Command::Help => self.say(HELP)?,
            Command::Unknown(name) => {
                debug!("{}: command not found", name);
                self.say(&format!("{}: command not found", name))?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Without redirection the text is only logged. With `>>` / `>` the file
    /// in the current directory is created if needed, then appended to or
    /// overwritten.
    fn echo(&mut self, text: String, redirect: Option<(Redirect, String)>) -> Result<(), ApiError> {
        let Some((mode, target)) = redirect else {
            info!("{}", text);
            return Ok(());
        };
        let result = self.namespace.touch(&target).and_then(|_| match mode {
            Redirect::Append => self.namespace.append(&target, &text),
            Redirect::Overwrite => self.namespace.write(&target, &text),
        });
        if let Err(e) = result {
            self.say(&format!("echo: '{}': {}", target, e.reason()))?;
        }
        Ok(())
    }

    /// `dest` naming a directory moves `source` into it; otherwise a bare
    /// name renames `source` in place.
    fn move_or_rename(&mut self, source: &str, dest: &str) -> Result<(), NamespaceError> {
        match self.namespace.find_directory(dest) {
            Ok(_) => self.namespace.move_node(source, dest).map(|_| ()),
            Err(NamespaceError::NoSuchPath(_)) if !dest.contains('/') => {
                self.namespace.rename(source, dest)
            }
            Err(e) => Err(e),
        }
    }

    fn say(&mut self, text: &str) -> Result<(), ApiError> {
        Ok(writeln!(self.out, "{}", text)?)
    }
}
