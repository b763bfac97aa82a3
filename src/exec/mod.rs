// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running each job's script through
//! the shell, using `tokio::process::Command`, and reporting how it ended.
//!
//! - [`backend`] provides the `JobRunner` trait the dispatcher talks to, so
//!   tests can swap in a runner that doesn't spawn real processes.
//! - [`shell`] holds `ShellRunner`, the production runner.
//! - [`output`] decides where a job's stdout and stderr end up.

pub mod backend;
pub mod output;
pub mod shell;

pub use backend::JobRunner;
pub use shell::ShellRunner;
