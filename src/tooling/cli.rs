//! CLI Tooling
//!
//! Command-line interface for shellfs. A session loads the saved namespace,
//! runs the shell over stdin or `-c` lines, and saves on the way out.

use crate::config::{ConfigLoader, ShellConfig};
use crate::error::ApiError;
use crate::namespace::Namespace;
use crate::shell::{Flow, Shell};
use crate::store::persistence::FileSnapshotStore;
use crate::store::{load_or_bootstrap, save_namespace};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// shellfs - in-memory namespace with a tiny shell
#[derive(Parser, Debug)]
#[command(name = "shellfs")]
#[command(about = "In-memory hierarchical namespace driven by a tiny shell")]
pub struct Cli {
    /// Configuration file path (layered over the global config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Binary snapshot file
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// JSON mirror file
    #[arg(long)]
    pub mirror: Option<PathBuf>,

    /// Home directory inside the namespace (default: /home/<user>)
    #[arg(long)]
    pub home: Option<String>,

    /// Ignore any saved snapshot and start from a fresh namespace
    #[arg(long)]
    pub fresh: bool,

    /// Do not save the namespace on exit
    #[arg(long)]
    pub no_save: bool,

    /// Run a command line instead of reading stdin (repeatable)
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    pub commands: Vec<String>,

    /// Enable verbose logging (debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold command-line flags into a loaded configuration. Flags win over
    /// every other source.
    pub fn apply_overrides(&self, config: &mut ShellConfig) {
        if let Some(home) = &self.home {
            config.home = Some(home.clone());
        }
        if let Some(snapshot) = &self.snapshot {
            config.storage.snapshot_path = Some(snapshot.clone());
        }
        if let Some(mirror) = &self.mirror {
            config.storage.mirror_path = Some(mirror.clone());
            config.storage.write_mirror = true;
        }
        if self.no_save {
            config.storage.save_on_exit = false;
        }

        let logging = &mut config.logging;
        if self.verbose {
            logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
    }
}

/// CLI context: resolved configuration plus the snapshot store it points at.
pub struct CliContext {
    config: ShellConfig,
    store: FileSnapshotStore,
    fresh: bool,
}

impl CliContext {
    /// Load configuration and apply the flags in `cli`.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = ConfigLoader::load(cli.config.as_deref())?;
        cli.apply_overrides(&mut config);
        Self::from_config(config, cli.fresh)
    }

    /// Build a context from an already-resolved configuration.
    pub fn from_config(config: ShellConfig, fresh: bool) -> Result<Self, ApiError> {
        let (snapshot_path, mirror_path) = config.storage.resolve_paths()?;
        let mut store = FileSnapshotStore::new(snapshot_path);
        if config.storage.write_mirror {
            store = store.with_mirror(mirror_path);
        }
        debug!(
            snapshot = %store.snapshot_path().display(),
            mirror = ?store.mirror_path(),
            "Resolved storage paths"
        );
        Ok(Self {
            config,
            store,
            fresh,
        })
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn store(&self) -> &FileSnapshotStore {
        &self.store
    }

    /// The namespace this session starts from.
    pub fn load_namespace(&self) -> Result<Namespace, ApiError> {
        let home = self.config.home_path();
        if self.fresh {
            info!("Starting from a fresh namespace");
            return Ok(Namespace::bootstrap(home, &self.config.bootstrap_dirs)?);
        }
        load_or_bootstrap(&self.store, &home, &self.config.bootstrap_dirs)
    }

    /// Run the shell over `input` until exit or end of input, then save.
    ///
    /// `interactive` controls whether prompts are written to `output`.
    pub fn run<R: BufRead, W: Write>(
        &self,
        input: R,
        output: W,
        interactive: bool,
    ) -> Result<Namespace, ApiError> {
        let mut shell = Shell::new(self.load_namespace()?, output);
        let outcome = shell.run(input, interactive);
        let (namespace, _) = shell.into_parts();
        // The session's work is saved even when the loop stopped on an error.
        self.finish(&namespace)?;
        outcome.map(|()| namespace)
    }

    /// Run each line in order, stopping early at an exit command, then save.
    pub fn run_commands<S: AsRef<str>, W: Write>(
        &self,
        lines: &[S],
        output: W,
    ) -> Result<Namespace, ApiError> {
        let mut shell = Shell::new(self.load_namespace()?, output);
        let mut outcome = Ok(());
        for line in lines {
            match shell.execute(line.as_ref()) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            }
        }
        let (namespace, _) = shell.into_parts();
        self.finish(&namespace)?;
        outcome.map(|()| namespace)
    }

    fn finish(&self, namespace: &Namespace) -> Result<(), ApiError> {
        if self.config.storage.save_on_exit {
            save_namespace(&self.store, namespace)
        } else {
            debug!("Saving disabled, discarding session");
            Ok(())
        }
    }
}
