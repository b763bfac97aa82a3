// src/engine/dispatch.rs

//! The dispatch loop.
//!
//! One coordinating task reads jobs in order, waits for an admission token
//! for each, and hands the job to a worker in the task group. Workers run
//! concurrently and finish in any order. At end of input the loop drains
//! the group, and only then looks at whether the input ended in an error.

use std::sync::Arc;

use tokio::io::AsyncBufRead;
use tracing::{debug, error, info};

use crate::config::RunConfig;
use crate::engine::admission::{Admission, AdmissionToken};
use crate::engine::group::TaskGroup;
use crate::engine::report::RunReport;
use crate::errors::Result;
use crate::exec::JobRunner;
use crate::source::JobSource;
use crate::types::{ExecutionOutcome, Job};

/// Runs every job from a [`JobSource`] through a [`JobRunner`], at most
/// `config.parallelism` at a time.
#[derive(Debug)]
pub struct Dispatcher<R> {
    runner: Arc<R>,
    admission: Admission,
}

impl<R: JobRunner> Dispatcher<R> {
    pub fn new(config: RunConfig, runner: R) -> Self {
        let admission = Admission::new(config.parallelism);
        Self {
            runner: Arc::new(runner),
            admission,
        }
    }

    /// Run every job in `source` and wait for all of them.
    ///
    /// Per-job failures are logged and counted in the returned report. The
    /// only error returned is a read error on `source`, and only after every
    /// launched job has finished.
    pub async fn run<I>(&self, mut source: JobSource<I>) -> Result<RunReport>
    where
        I: AsyncBufRead + Unpin,
    {
        let mut workers: TaskGroup<(usize, ExecutionOutcome)> = TaskGroup::new();
        let mut report = RunReport::default();
        debug!(
            capacity = self.admission.capacity(),
            origin = %source.origin(),
            "dispatch started"
        );

        while let Some(job) = source.next_job().await {
            let token = self.admission.acquire().await;

            for joined in workers.reap() {
                report.record(joined);
            }

            self.launch(&mut workers, job, token);
            report.launched += 1;
        }

        debug!(
            jobs_read = source.jobs_read(),
            outstanding = workers.outstanding(),
            tokens_free = self.admission.available(),
            "input exhausted; draining workers"
        );
        for joined in workers.join_all().await {
            report.record(joined);
        }

        if let Some(err) = source.take_error() {
            return Err(err);
        }

        Ok(report)
    }

    fn launch(
        &self,
        workers: &mut TaskGroup<(usize, ExecutionOutcome)>,
        job: Job,
        token: AdmissionToken,
    ) {
        info!(seq = job.seq, job = %job.text(), "starting job");

        let runner = Arc::clone(&self.runner);
        workers.spawn(async move {
            let seq = job.seq;
            let outcome = runner.execute(job).await;
            token.release();
            log_outcome(seq, &outcome);
            (seq, outcome)
        });
    }
}

fn log_outcome(seq: usize, outcome: &ExecutionOutcome) {
    match outcome {
        Ok(status) => info!(
            seq,
            success = status.success,
            exit_code = ?status.code,
            "job finished"
        ),
        Err(err) => error!(seq, error = %err, "job error"),
    }
}
