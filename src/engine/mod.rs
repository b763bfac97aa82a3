// src/engine/mod.rs

//! Dispatch engine.
//!
//! This module ties together:
//! - the admission controller that caps how many jobs run at once
//!   ([`admission`])
//! - the task group that owns every launched worker until it is joined
//!   ([`group`])
//! - the dispatch loop that reads jobs, admits them, and drains the group
//!   at end of input ([`dispatch`])
//! - the per-run tally built from joined workers ([`report`])

pub mod admission;
pub mod dispatch;
pub mod group;
pub mod report;

pub use admission::{Admission, AdmissionToken};
pub use dispatch::Dispatcher;
pub use group::TaskGroup;
pub use report::RunReport;
