//! Presenter interface
//!
//! The poller owns no display state. Every status change, log line and
//! outcome is reported to a presenter, which also owns the "currently
//! entered" job id used by manual poll requests.

use std::sync::{Arc, Mutex};

/// Notification interface the poller reports to
///
/// Implementations must be cheap and non-blocking: they are called from
/// inside the poll loop.
pub trait Presenter: Send + Sync {
    /// The displayed status changed
    ///
    /// # Arguments
    /// * `status` - A server status (`queued`, `done`, ...) or a local one (`polling`, `error`, ...)
    /// * `meta` - Secondary text such as `job_id: <id>` or an error message
    fn on_status_changed(&self, status: &str, meta: &str);

    /// A user-facing log line
    fn on_log_line(&self, message: &str);

    /// The job finished and produced a description
    fn on_result(&self, description: &str);

    /// The job, or its submission, failed
    fn on_failed(&self, message: &str);

    /// The result is not available yet
    fn on_pending(&self, message: &str);

    /// The server accepted a submission and assigned `job_id`
    fn on_job_submitted(&self, _job_id: &str) {}

    /// A request failed and the poller gave up
    ///
    /// Sent after the `error` status, for a failed submit or a failed poll
    /// cycle. Server-reported job failures go through `on_failed` instead.
    fn on_error(&self, _message: &str) {}

    /// Polling was stopped on user request
    fn on_stopped(&self) {}

    /// The job id currently entered by the user, if any
    fn current_job_id(&self) -> Option<String>;
}

/// A single notification recorded by [`MemoryPresenter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Status { status: String, meta: String },
    Log(String),
    Result(String),
    Failed(String),
    Pending(String),
    Submitted(String),
    Error(String),
    Stopped,
}

/// Presenter that records notifications in memory
///
/// Useful for headless embedding and for tests. Submitted job ids become
/// the current job id, mirroring an input field filled in after upload.
#[derive(Clone, Default)]
pub struct MemoryPresenter {
    events: Arc<Mutex<Vec<PresenterEvent>>>,
    job_id: Arc<Mutex<Option<String>>>,
}

impl MemoryPresenter {
    /// Creates an empty presenter
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the currently entered job id
    pub fn set_job_id(&self, job_id: impl Into<String>) {
        *self.job_id.lock().unwrap() = Some(job_id.into());
    }

    /// All events recorded so far
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events.lock().unwrap().clone()
    }

    /// The most recent status and meta
    pub fn last_status(&self) -> Option<(String, String)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find_map(|event| match event {
                PresenterEvent::Status { status, meta } => Some((status.clone(), meta.clone())),
                _ => None,
            })
    }

    /// The most recent result text: a description, failure or pending message
    pub fn last_output(&self) -> Option<PresenterEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|event| {
                matches!(
                    event,
                    PresenterEvent::Result(_)
                        | PresenterEvent::Failed(_)
                        | PresenterEvent::Pending(_)
                )
            })
            .cloned()
    }

    /// Log lines in the order they were emitted
    pub fn log_lines(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Log(line) => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: PresenterEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Presenter for MemoryPresenter {
    fn on_status_changed(&self, status: &str, meta: &str) {
        self.record(PresenterEvent::Status {
            status: status.to_string(),
            meta: meta.to_string(),
        });
    }

    fn on_log_line(&self, message: &str) {
        self.record(PresenterEvent::Log(message.to_string()));
    }

    fn on_result(&self, description: &str) {
        self.record(PresenterEvent::Result(description.to_string()));
    }

    fn on_failed(&self, message: &str) {
        self.record(PresenterEvent::Failed(message.to_string()));
    }

    fn on_pending(&self, message: &str) {
        self.record(PresenterEvent::Pending(message.to_string()));
    }

    fn on_job_submitted(&self, job_id: &str) {
        self.set_job_id(job_id);
        self.record(PresenterEvent::Submitted(job_id.to_string()));
    }

    fn on_error(&self, message: &str) {
        self.record(PresenterEvent::Error(message.to_string()));
    }

    fn on_stopped(&self) {
        self.record(PresenterEvent::Stopped);
    }

    fn current_job_id(&self) -> Option<String> {
        self.job_id.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_events_in_order() {
        let presenter = MemoryPresenter::new();
        presenter.on_status_changed("queued", "job_id: abc");
        presenter.on_log_line("status: queued");
        presenter.on_result("a photo of a cat");

        assert_eq!(
            presenter.events(),
            vec![
                PresenterEvent::Status {
                    status: "queued".to_string(),
                    meta: "job_id: abc".to_string(),
                },
                PresenterEvent::Log("status: queued".to_string()),
                PresenterEvent::Result("a photo of a cat".to_string()),
            ]
        );
        assert_eq!(
            presenter.last_output(),
            Some(PresenterEvent::Result("a photo of a cat".to_string()))
        );
    }

    #[test]
    fn test_submitted_job_becomes_current() {
        let presenter = MemoryPresenter::new();
        assert!(presenter.current_job_id().is_none());

        presenter.on_job_submitted("abc");
        assert_eq!(presenter.current_job_id().as_deref(), Some("abc"));
    }

    #[test]
    fn test_error_and_stop_are_recorded() {
        let presenter = MemoryPresenter::new();
        presenter.on_error("boom");
        presenter.on_stopped();

        assert_eq!(
            presenter.events(),
            vec![PresenterEvent::Error("boom".to_string()), PresenterEvent::Stopped]
        );
        assert!(presenter.last_output().is_none());
    }

    #[test]
    fn test_last_status() {
        let presenter = MemoryPresenter::new();
        presenter.on_status_changed("polling", "job_id: abc");
        presenter.on_log_line("poll start: job_id=abc");
        presenter.on_status_changed("processing", "job_id: abc");

        assert_eq!(
            presenter.last_status(),
            Some(("processing".to_string(), "job_id: abc".to_string()))
        );
        assert_eq!(presenter.log_lines(), vec!["poll start: job_id=abc"]);
    }
}
