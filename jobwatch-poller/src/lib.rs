//! Jobwatch Poller
//!
//! Tracks a single submitted job until it reaches a terminal state.
//!
//! Architecture:
//! - Configuration: server URL, poll interval and request timeout
//! - Presenter: the notification interface the poller reports to
//! - Scheduler: submission, the periodic poll loop and its cancellation
//!
//! The poller submits a file, polls the job's status on a fixed interval,
//! fetches the result once the job is done and reports every step to a
//! presenter. At most one poll loop is active per poller.

pub mod config;
pub mod presenter;
pub mod scheduler;

pub use config::Config;
pub use presenter::{MemoryPresenter, Presenter, PresenterEvent};
pub use scheduler::{CycleOutcome, JobPoller, result_text};
