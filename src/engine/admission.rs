// src/engine/admission.rs

//! Admission controller: a counting semaphore with one token per job slot.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Gate that lets at most `capacity` jobs run at once.
///
/// Cloning shares the same pool of tokens. Waiters are not guaranteed to be
/// served in any particular order.
#[derive(Debug, Clone)]
pub struct Admission {
    semaphore: Arc<Semaphore>,
    capacity: NonZeroUsize,
}

/// One unit of capacity. Returned to the pool when released or dropped.
#[derive(Debug)]
pub struct AdmissionToken {
    _permit: OwnedSemaphorePermit,
}

impl AdmissionToken {
    /// Give the token back, waking at most one waiter.
    pub fn release(self) {}
}

impl Admission {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity.get())),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Tokens not currently held.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Wait until a token is free and take it.
    pub async fn acquire(&self) -> AdmissionToken {
        // The semaphore is private and never closed, so acquiring only ever
        // waits.
        let Ok(permit) = Arc::clone(&self.semaphore).acquire_owned().await else {
            unreachable!("admission semaphore is never closed");
        };
        AdmissionToken { _permit: permit }
    }
}
