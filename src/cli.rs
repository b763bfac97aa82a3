// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::RawRunSection;
use crate::types::OutputFallback;

/// Command-line arguments for `batch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "batch",
    version,
    about = "Execute jobs in batches.",
    long_about = "Execute jobs in batches.\n\n\
        Jobs are read from FILE or stdin, one per line, and each line is \
        executed by $SHELL."
)]
pub struct CliArgs {
    /// File with one job per line. Reads stdin when omitted.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Maximum number of jobs to run in parallel [default: 1].
    #[arg(short = 'n', value_name = "N")]
    pub parallelism: Option<usize>,

    /// Write stdout and stderr of each job to <seq>.out in the log directory.
    #[arg(short = 'l')]
    pub job_log: bool,

    /// Write status information to stderr.
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Directory for job log files [default: current directory].
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Let jobs that are not logged share batch's stdout and stderr instead
    /// of discarding their output.
    #[arg(long)]
    pub inherit_output: bool,

    /// Optional TOML file with a [run] section; flags override it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level used with -v (error, warn, info, debug, trace).
    ///
    /// If omitted, `BATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl CliArgs {
    /// Settings given on the command line, as overrides for the config file.
    pub fn overrides(&self) -> RawRunSection {
        RawRunSection {
            parallelism: self.parallelism,
            job_log: self.job_log.then_some(true),
            log_dir: self.log_dir.clone(),
            fallback_output: self.inherit_output.then_some(OutputFallback::Inherit),
            shell: None,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
