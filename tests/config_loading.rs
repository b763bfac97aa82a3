// tests/config_loading.rs

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tempfile::NamedTempFile;

use batch::cli::CliArgs;
use batch::config::{load_and_validate, load_from_path, RunConfig};
use batch::errors::BatchError;
use batch::resolve_config;
use batch::types::OutputFallback;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn args(argv: &[&str]) -> CliArgs {
    CliArgs::try_parse_from(std::iter::once("batch").chain(argv.iter().copied())).unwrap()
}

#[test]
fn defaults_without_file_or_flags() {
    let cfg = resolve_config(&args(&[]), Some(OsString::from("/bin/bash"))).unwrap();

    assert_eq!(
        cfg,
        RunConfig {
            shell: Some(PathBuf::from("/bin/bash")),
            ..RunConfig::default()
        }
    );
    assert_eq!(cfg.parallelism.get(), 1);
    assert!(!cfg.job_log);
    assert_eq!(cfg.log_dir, PathBuf::from("."));
    assert_eq!(cfg.fallback_output, OutputFallback::Discard);
}

#[test]
fn flags_map_onto_run_config() {
    let cfg = resolve_config(
        &args(&["-n", "8", "-l", "--log-dir", "out", "--inherit-output", "jobs.txt"]),
        None,
    )
    .unwrap();

    assert_eq!(cfg.parallelism.get(), 8);
    assert!(cfg.job_log);
    assert_eq!(cfg.log_dir, PathBuf::from("out"));
    assert_eq!(cfg.fallback_output, OutputFallback::Inherit);
    assert_eq!(cfg.shell, None);
}

#[test]
fn empty_shell_env_counts_as_unset() {
    let cfg = resolve_config(&args(&[]), Some(OsString::new())).unwrap();
    assert_eq!(cfg.shell, None);
}

#[test]
fn file_values_apply_and_flags_win() {
    let file = config_file(
        r#"
[run]
parallelism = 3
job_log = true
log_dir = "logs"
fallback_output = "inherit"
shell = "/bin/zsh"
"#,
    );
    let path = file.path().to_str().unwrap();

    let from_file = resolve_config(&args(&["--config", path]), None).unwrap();
    assert_eq!(from_file.parallelism.get(), 3);
    assert!(from_file.job_log);
    assert_eq!(from_file.log_dir, PathBuf::from("logs"));
    assert_eq!(from_file.fallback_output, OutputFallback::Inherit);
    assert_eq!(from_file.shell, Some(PathBuf::from("/bin/zsh")));

    let overridden = resolve_config(
        &args(&["--config", path, "-n", "5", "--log-dir", "elsewhere"]),
        Some(OsString::from("/bin/sh")),
    )
    .unwrap();
    assert_eq!(overridden.parallelism.get(), 5);
    assert_eq!(overridden.log_dir, PathBuf::from("elsewhere"));
    // A shell named in the file beats $SHELL.
    assert_eq!(overridden.shell, Some(PathBuf::from("/bin/zsh")));
}

#[test]
fn empty_file_is_valid() {
    let file = config_file("");
    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.run.parallelism, None);
}

#[test]
fn zero_parallelism_in_file_is_a_config_error() {
    let file = config_file("[run]\nparallelism = 0\n");

    match load_and_validate(file.path()) {
        Err(BatchError::ConfigError(msg)) => assert!(msg.contains("parallelism")),
        Err(e) => panic!("Expected ConfigError, got: {e:?}"),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn zero_parallelism_flag_is_a_config_error() {
    match resolve_config(&args(&["-n", "0"]), None) {
        Err(BatchError::ConfigError(msg)) => assert!(msg.contains(">= 1")),
        other => panic!("Expected ConfigError, got: {other:?}"),
    }
}

#[test]
fn parallelism_beyond_semaphore_limit_is_a_config_error() {
    let too_many = (tokio::sync::Semaphore::MAX_PERMITS + 1).to_string();

    match resolve_config(&args(&["-n", &too_many]), None) {
        Err(BatchError::ConfigError(msg)) => assert!(msg.contains("<=")),
        other => panic!("Expected ConfigError, got: {other:?}"),
    }

    let file = config_file("[run]\nparallelism = 9223372036854775807\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(BatchError::ConfigError(_))
    ));

    let max = tokio::sync::Semaphore::MAX_PERMITS.to_string();
    let cfg = resolve_config(&args(&["-n", &max]), None).unwrap();
    assert_eq!(cfg.parallelism.get(), tokio::sync::Semaphore::MAX_PERMITS);
}

#[test]
fn empty_log_dir_is_a_config_error() {
    let file = config_file("[run]\nlog_dir = \"\"\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(BatchError::ConfigError(_))
    ));
}

#[test]
fn unknown_keys_are_rejected() {
    let file = config_file("[run]\nparalelism = 2\n");
    assert!(matches!(
        load_from_path(file.path()),
        Err(BatchError::TomlError(_))
    ));
}

#[test]
fn bad_fallback_value_is_rejected() {
    let file = config_file("[run]\nfallback_output = \"tee\"\n");
    assert!(matches!(
        load_from_path(file.path()),
        Err(BatchError::TomlError(_))
    ));
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("batch.toml");

    assert!(matches!(
        load_from_path(&missing),
        Err(BatchError::IoError(_))
    ));
}
