//! Scheduler layer for the poller
//!
//! This layer handles submitting a file and polling the job service for
//! the submitted job until it reaches a terminal state. It owns the single
//! active poll loop and its cancellation.

pub mod poller;

pub use poller::{CycleOutcome, JobPoller, result_text};
