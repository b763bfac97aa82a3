use std::collections::HashSet;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use batch::errors::JobError;
use batch::exec::JobRunner;
use batch::types::{ExecutionOutcome, Job, JobStatus};

/// What a `FakeRunner` saw.
#[derive(Debug, Default)]
pub struct Probe {
    executed: Mutex<Vec<(usize, String)>>,
    running: AtomicUsize,
    peak: AtomicUsize,
    completed: AtomicUsize,
}

impl Probe {
    /// `(seq, script)` pairs in the order the jobs started.
    pub fn executed(&self) -> Vec<(usize, String)> {
        self.executed.lock().unwrap().clone()
    }

    /// Sorted sequence numbers of every job started.
    pub fn seqs(&self) -> Vec<usize> {
        let mut seqs: Vec<usize> = self.executed().into_iter().map(|(seq, _)| seq).collect();
        seqs.sort_unstable();
        seqs
    }

    /// Jobs executing right now.
    pub fn running(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    /// Highest number of jobs seen executing at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Jobs that ran to the end of their delay.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

/// A fake runner that:
/// - records which jobs were "run" and how many ran at once
/// - sleeps for a fixed delay instead of spawning a process
/// - reports success unless told otherwise for a given sequence number.
pub struct FakeRunner {
    delay: Duration,
    failing: HashSet<usize>,
    erroring: HashSet<usize>,
    panicking: HashSet<usize>,
    probe: Arc<Probe>,
}

impl FakeRunner {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failing: HashSet::new(),
            erroring: HashSet::new(),
            panicking: HashSet::new(),
            probe: Arc::new(Probe::default()),
        }
    }

    /// Job `seq` exits with status 1.
    pub fn failing(mut self, seq: usize) -> Self {
        self.failing.insert(seq);
        self
    }

    /// Job `seq` fails to launch.
    pub fn erroring(mut self, seq: usize) -> Self {
        self.erroring.insert(seq);
        self
    }

    /// Job `seq` panics inside its worker.
    pub fn panicking(mut self, seq: usize) -> Self {
        self.panicking.insert(seq);
        self
    }

    /// Shared view of what this runner records; keep it before handing the
    /// runner to a dispatcher.
    pub fn probe(&self) -> Arc<Probe> {
        Arc::clone(&self.probe)
    }
}

impl JobRunner for FakeRunner {
    fn execute(
        &self,
        job: Job,
    ) -> Pin<Box<dyn Future<Output = ExecutionOutcome> + Send + '_>> {
        Box::pin(async move {
            let probe = &self.probe;
            probe
                .executed
                .lock()
                .unwrap()
                .push((job.seq, job.text().into_owned()));

            let now = probe.running.fetch_add(1, Ordering::SeqCst) + 1;
            probe.peak.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(self.delay).await;

            probe.running.fetch_sub(1, Ordering::SeqCst);
            probe.completed.fetch_add(1, Ordering::SeqCst);

            if self.panicking.contains(&job.seq) {
                panic!("fake runner told to panic on job {}", job.seq);
            }
            if self.erroring.contains(&job.seq) {
                return Err(JobError::Launch {
                    seq: job.seq,
                    source: io::Error::other("fake launch failure"),
                });
            }
            if self.failing.contains(&job.seq) {
                return Ok(JobStatus::from_code(1));
            }
            Ok(JobStatus::from_code(0))
        })
    }
}
