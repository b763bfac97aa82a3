// src/engine/group.rs

//! Structured task group for worker tasks.

use std::future::Future;

use tokio::task::{JoinError, JoinSet};

/// Owns every spawned worker until it has been joined.
///
/// Finished workers are dropped from the group as soon as they are joined,
/// either opportunistically through [`reap`](TaskGroup::reap) or at the end
/// through [`join_all`](TaskGroup::join_all).
#[derive(Debug)]
pub struct TaskGroup<T> {
    tasks: JoinSet<T>,
}

impl<T: Send + 'static> TaskGroup<T> {
    pub fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
        }
    }

    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.tasks.spawn(task);
    }

    /// Workers spawned but not yet joined.
    pub fn outstanding(&self) -> usize {
        self.tasks.len()
    }

    /// Join whatever has already finished, without waiting.
    pub fn reap(&mut self) -> Vec<Result<T, JoinError>> {
        let mut joined = Vec::new();
        while let Some(result) = self.tasks.try_join_next() {
            joined.push(result);
        }
        joined
    }

    /// Wait for every outstanding worker.
    pub async fn join_all(&mut self) -> Vec<Result<T, JoinError>> {
        let mut joined = Vec::with_capacity(self.tasks.len());
        while let Some(result) = self.tasks.join_next().await {
            joined.push(result);
        }
        joined
    }
}

impl<T: Send + 'static> Default for TaskGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}
