//! Shell command parsing.
//!
//! A line is split on whitespace into a command name and its arguments.

use crate::error::ApiError;

/// Echo redirection operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// `>>`
    Append,
    /// `>`
    Overwrite,
}

impl Redirect {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            ">>" => Some(Redirect::Append),
            ">" => Some(Redirect::Overwrite),
            _ => None,
        }
    }
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line
    Empty,
    Ls,
    Mkdir(Vec<String>),
    Touch(Vec<String>),
    /// `cd` without an argument goes home.
    Cd(Option<String>),
    Echo {
        text: String,
        redirect: Option<(Redirect, String)>,
    },
    Cat(Vec<String>),
    Rm(Vec<String>),
    Mv {
        source: String,
        dest: String,
    },
    Pwd,
    Debug,
    Help,
    Exit,
    Unknown(String),
}

impl Command {
    /// Parse one input line.
    ///
    /// Usage errors (missing operands and the like) come back as
    /// `ApiError::Command` carrying the diagnostic to print.
    pub fn parse(line: &str) -> Result<Self, ApiError> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(Command::Empty);
        };
        let args: Vec<String> = parts.map(str::to_string).collect();

        let command = match name {
            "ls" | "ll" => Command::Ls,
            "mkdir" => Command::Mkdir(require_operands(name, args)?),
            "touch" => Command::Touch(require_operands(name, args)?),
            "cat" => Command::Cat(require_operands(name, args)?),
            "rm" => Command::Rm(require_operands(name, args)?),
            "cd" => match args.len() {
                0 => Command::Cd(None),
                1 => Command::Cd(args.into_iter().next()),
                _ => return Err(ApiError::Command("cd: too many arguments".to_string())),
            },
            "echo" => parse_echo(args)?,
            "mv" => match <[String; 2]>::try_from(args) {
                Ok([source, dest]) => Command::Mv { source, dest },
                Err(args) if args.len() < 2 => {
                    return Err(ApiError::Command("mv: missing file operand".to_string()))
                }
                Err(_) => return Err(ApiError::Command("mv: too many arguments".to_string())),
            },
            "pwd" => Command::Pwd,
            "debug" | "d" => Command::Debug,
            "help" | "?" => Command::Help,
            "exit" | "e" | "x" => Command::Exit,
            other => Command::Unknown(other.to_string()),
        };
        Ok(command)
    }

    /// Command name used in logs.
    pub fn name(&self) -> &str {
        match self {
            Command::Empty => "",
            Command::Ls => "ls",
            Command::Mkdir(_) => "mkdir",
            Command::Touch(_) => "touch",
            Command::Cd(_) => "cd",
            Command::Echo { .. } => "echo",
            Command::Cat(_) => "cat",
            Command::Rm(_) => "rm",
            Command::Mv { .. } => "mv",
            Command::Pwd => "pwd",
            Command::Debug => "debug",
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Unknown(name) => name,
        }
    }
}

fn require_operands(name: &str, args: Vec<String>) -> Result<Vec<String>, ApiError> {
    if args.is_empty() {
        return Err(ApiError::Command(format!("{}: missing operand", name)));
    }
    Ok(args)
}

/// `echo words [>> target] more words`: the operator and its target are cut
/// out, the remaining words are joined with single spaces.
fn parse_echo(mut args: Vec<String>) -> Result<Command, ApiError> {
    let position = args
        .iter()
        .position(|token| Redirect::from_token(token).is_some());
    let redirect = match position {
        None => None,
        Some(index) if index + 1 >= args.len() => {
            return Err(ApiError::Command(
                "echo: missing redirection target".to_string(),
            ))
        }
        Some(index) => {
            let mut removed = args.drain(index..index + 2);
            let operator = removed.next().and_then(|token| Redirect::from_token(&token));
            let target = removed.next();
            drop(removed);
            operator.zip(target)
        }
    };
    Ok(Command::Echo {
        text: args.join(" "),
        redirect,
    })
}
