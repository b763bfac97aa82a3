// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod source;
pub mod types;

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::info;

use crate::cli::CliArgs;
use crate::config::{load_and_validate, RawRunSection, RunConfig};
use crate::engine::{Dispatcher, RunReport};
use crate::errors::Result;
use crate::exec::ShellRunner;
use crate::source::open_input;

/// Environment variable naming the shell interpreter.
pub const SHELL_ENV: &str = "SHELL";

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution (file, flags, `$SHELL`)
/// - the job source (file or stdin)
/// - the shell runner and the dispatch loop
pub async fn run(args: CliArgs) -> Result<RunReport> {
    let config = resolve_config(&args, std::env::var_os(SHELL_ENV))?;
    let source = open_input(args.file.as_deref()).await?;

    info!(
        parallelism = config.parallelism.get(),
        job_log = config.job_log,
        input = %source.origin(),
        shell = ?config.shell,
        "batch starting"
    );

    let runner = ShellRunner::from_config(&config);
    let dispatcher = Dispatcher::new(config, runner);
    let report = dispatcher.run(source).await?;

    info!(
        launched = report.launched,
        succeeded = report.succeeded,
        failed = report.failed,
        errored = report.errored,
        finished = report.finished(),
        all_succeeded = report.all_succeeded(),
        "all jobs finished"
    );

    Ok(report)
}

/// Build the run configuration.
///
/// Precedence, highest first: command-line flags, the `--config` file, and
/// for the shell only, the value of `$SHELL` passed in as `shell_env`.
pub fn resolve_config(args: &CliArgs, shell_env: Option<OsString>) -> Result<RunConfig> {
    let from_file = match &args.config {
        Some(path) => load_and_validate(path)?.run,
        None => RawRunSection::default(),
    };

    let mut raw = from_file.overridden_by(args.overrides());
    if raw.shell.is_none() {
        raw.shell = shell_env.map(PathBuf::from);
    }

    RunConfig::try_from(raw)
}
