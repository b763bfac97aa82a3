// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! [`BatchError`] covers failures that abort the whole run (bad config,
//! unreadable job list). [`JobError`] covers failures local to one job; those
//! are logged by the dispatcher and never abort the run.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("reading jobs from {origin}")]
    InputError {
        origin: String,
        #[source]
        source: io::Error,
    },

    #[error("IO error")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure to execute a single job.
///
/// A job that runs and exits non-zero is *not* a `JobError`; that is a
/// regular [`JobStatus`](crate::types::JobStatus) with `success = false`.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("job [{seq}]: no shell interpreter configured (is $SHELL set?)")]
    NoShell { seq: usize },

    #[error("job [{seq}]: failed to launch shell: {source}")]
    Launch {
        seq: usize,
        #[source]
        source: io::Error,
    },

    #[error("job [{seq}]: failed to wait for shell: {source}")]
    Wait {
        seq: usize,
        #[source]
        source: io::Error,
    },
}


pub type Result<T> = std::result::Result<T, BatchError>;
