use clap::Parser;
use shellfs::config::ShellConfig;
use shellfs::tooling::cli::{Cli, CliContext};
use std::path::Path;
use tempfile::TempDir;

fn config_in(dir: &Path) -> ShellConfig {
    let mut config = ShellConfig::default();
    config.user = Some("tester".to_string());
    config.bootstrap_dirs = vec!["/tmp".to_string()];
    config.storage.snapshot_path = Some(dir.join("fs.bin"));
    config.storage.mirror_path = Some(dir.join("fs.json"));
    config
}

#[test]
fn parse_valid_flag_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["shellfs"],
        vec!["shellfs", "--fresh", "--no-save"],
        vec!["shellfs", "--config", "/tmp/shellfs.toml"],
        vec!["shellfs", "--snapshot", "/tmp/fs.bin", "--mirror", "/tmp/fs.json"],
        vec!["shellfs", "--home", "/users/me"],
        vec!["shellfs", "-c", "mkdir a", "-c", "ls"],
        vec!["shellfs", "--verbose", "--log-level", "trace"],
        vec!["shellfs", "--log-format", "json", "--log-output", "file", "--log-file", "/tmp/x.log"],
    ];
    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_unknown_flags_and_missing_values() {
    assert!(Cli::try_parse_from(["shellfs", "--bogus"]).is_err());
    assert!(Cli::try_parse_from(["shellfs", "--snapshot"]).is_err());
    assert!(Cli::try_parse_from(["shellfs", "-c"]).is_err());
}

#[test]
fn session_state_survives_between_runs() {
    let dir = TempDir::new().unwrap();
    let context = CliContext::from_config(config_in(dir.path()), false).unwrap();

    let mut out = Vec::new();
    context
        .run_commands(&["mkdir work", "cd work", "echo hello >> greeting"], &mut out)
        .unwrap();
    assert!(dir.path().join("fs.bin").exists());
    assert!(dir.path().join("fs.json").exists());

    let mut out = Vec::new();
    let ns = context.run("pwd\ncat greeting\n".as_bytes(), &mut out, false).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "/home/tester/work\nhello\n");
    assert_eq!(ns.cwd(), "/home/tester/work");
}

#[test]
fn fresh_ignores_saved_snapshot() {
    let dir = TempDir::new().unwrap();
    let saving = CliContext::from_config(config_in(dir.path()), false).unwrap();
    saving.run_commands(&["mkdir kept"], Vec::new()).unwrap();

    let fresh = CliContext::from_config(config_in(dir.path()), true).unwrap();
    let ns = fresh.load_namespace().unwrap();
    assert!(ns.find_directory("kept").is_err());
    assert_eq!(ns.cwd(), "/home/tester");
}

#[test]
fn no_save_leaves_disk_untouched() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path());
    config.storage.save_on_exit = false;
    let context = CliContext::from_config(config, false).unwrap();
    context.run_commands(&["mkdir temp"], Vec::new()).unwrap();
    assert!(!dir.path().join("fs.bin").exists());
}

#[test]
fn exit_stops_command_list() {
    let dir = TempDir::new().unwrap();
    let context = CliContext::from_config(config_in(dir.path()), false).unwrap();
    let ns = context
        .run_commands(&["mkdir a", "exit", "mkdir b"], Vec::new())
        .unwrap();
    assert!(ns.find_directory("a").is_ok());
    assert!(ns.find_directory("b").is_err());
}

#[test]
fn cli_context_reads_explicit_config_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("shellfs.toml");
    std::fs::write(
        &config_path,
        format!(
            "home = \"/srv/home\"\nbootstrap_dirs = []\n\n[storage]\nsnapshot_path = \"{}\"\nwrite_mirror = false\n",
            dir.path().join("state.bin").display()
        ),
    )
    .unwrap();

    let cli = Cli::try_parse_from(["shellfs", "--config", config_path.to_str().unwrap()]).unwrap();
    let context = CliContext::new(&cli).unwrap();
    assert_eq!(context.config().home_path(), "/srv/home");
    assert!(context.store().mirror_path().is_none());

    let ns = context.run_commands(&["pwd"], Vec::new()).unwrap();
    assert_eq!(ns.cwd(), "/srv/home");
    assert!(dir.path().join("state.bin").exists());
}

#[test]
fn invalid_utf8_input_is_saved_with_the_session() {
    let dir = TempDir::new().unwrap();
    let context = CliContext::from_config(config_in(dir.path()), false).unwrap();
    let input: &[u8] = b"mkdir keep\necho \xff\xfe\nmkdir after\n";
    let ns = context.run(input, Vec::new(), false).unwrap();
    assert!(ns.find_directory("keep").is_ok());
    assert!(ns.find_directory("after").is_ok());
    assert!(dir.path().join("fs.bin").exists());

    let reloaded = context.load_namespace().unwrap();
    assert!(reloaded.find_directory("/home/tester/after").is_ok());
}

#[test]
fn session_is_saved_when_output_fails() {
    struct Closed;
    impl std::io::Write for Closed {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let dir = TempDir::new().unwrap();
    let context = CliContext::from_config(config_in(dir.path()), false).unwrap();
    let result = context.run("mkdir kept\npwd\nmkdir never\n".as_bytes(), Closed, false);
    assert!(matches!(result, Err(shellfs::error::ApiError::ShellIo(_))));

    let reloaded = context.load_namespace().unwrap();
    assert!(reloaded.find_directory("kept").is_ok());
    assert!(reloaded.find_directory("never").is_err());
}
