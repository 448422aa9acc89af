//! shellfs CLI Binary
//!
//! Interactive shell over a persistent in-memory namespace.

use anyhow::Context;
use clap::Parser;
use shellfs::logging::init_logging;
use shellfs::tooling::cli::{Cli, CliContext};
use std::io::{self, IsTerminal};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let context = CliContext::new(&cli).context("Failed to load configuration")?;
    init_logging(Some(&context.config().logging)).context("Failed to initialize logging")?;

    let stdout = io::stdout();
    if cli.commands.is_empty() {
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        context
            .run(stdin.lock(), stdout.lock(), interactive)
            .context("Shell session failed")?;
    } else {
        context
            .run_commands(&cli.commands, stdout.lock())
            .context("Shell session failed")?;
    }
    Ok(())
}
