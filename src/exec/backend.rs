// src/exec/backend.rs

//! Pluggable runner abstraction.
//!
//! The dispatcher talks to a `JobRunner` instead of spawning processes
//! itself. Production code uses [`ShellRunner`](super::ShellRunner); tests
//! provide runners that, for example, sleep and record which jobs they saw.

use std::future::Future;
use std::pin::Pin;

use crate::types::{ExecutionOutcome, Job};

/// Executes one job to completion.
///
/// The dispatcher shares a single runner between all worker tasks, so
/// implementations must be `Sync` and keep any per-job state inside the
/// returned future.
pub trait JobRunner: Send + Sync + 'static {
    /// Run `job` and report how it ended.
    ///
    /// Errors are returned as values; they are local to the job and never
    /// stop the run.
    fn execute(
        &self,
        job: Job,
    ) -> Pin<Box<dyn Future<Output = ExecutionOutcome> + Send + '_>>;
}
