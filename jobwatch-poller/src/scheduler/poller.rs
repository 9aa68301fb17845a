//! Job poller
//!
//! Submits files to the job service and polls the submitted job until it is
//! done or failed. Each poll loop runs in its own task; starting a new loop
//! cancels the previous one.

use jobwatch_client::{ClientError, JobApi, Result};
use jobwatch_core::domain::job::{Job, JobStatus, LocalStatus};
use jobwatch_core::domain::upload::UploadFile;
use jobwatch_core::dto::job::{ResultOutcome, ResultResponse};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::time::{self, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::presenter::Presenter;

/// Shown while a submitted or manually polled job has no result yet
pub const WAITING_PLACEHOLDER: &str = "(waiting for result...)";

/// Shown when the server reports the job as failed
pub const JOB_FAILED_PLACEHOLDER: &str = "(job failed — see status error above)";

/// Shown when the submit call itself failed
pub const SUBMIT_FAILED_PLACEHOLDER: &str = "(submit failed)";

/// Shown when a finished job returned no description
pub const NO_DESCRIPTION_PLACEHOLDER: &str = "(no description returned)";

/// What a single poll cycle observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The job is not finished yet
    InProgress(JobStatus),
    /// Status says done but the result endpoint answered 202
    ResultPending(String),
    /// The job is done; its description was delivered and is attached
    Completed(Job),
    /// The server reported the job as failed, with its error if any
    Failed(Job),
}

impl CycleOutcome {
    /// Whether the poll loop ends after this cycle
    pub fn is_terminal(&self) -> bool {
        matches!(self, CycleOutcome::Completed(_) | CycleOutcome::Failed(_))
    }
}

/// The poll loop currently owned by a poller
struct ActivePoll {
    job_id: String,
    cancel: CancellationToken,
    finished: watch::Receiver<bool>,
}

/// Job poller that tracks one job at a time
///
/// Holds the only piece of scheduling state: the active poll loop. Each
/// poller is independent of any other.
pub struct JobPoller {
    api: Arc<dyn JobApi>,
    presenter: Arc<dyn Presenter>,
    poll_interval: Duration,
    active: Mutex<Option<ActivePoll>>,
}

impl JobPoller {
    /// Creates a new job poller
    pub fn new(config: &Config, api: Arc<dyn JobApi>, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            api,
            presenter,
            // tokio intervals cannot be zero
            poll_interval: config.poll_interval.max(Duration::from_millis(1)),
            active: Mutex::new(None),
        }
    }

    /// Submits a file and starts polling the created job
    ///
    /// Failures are reported to the presenter and returned; polling is not
    /// started in that case.
    pub async fn submit(&self, file: &UploadFile) -> Result<Job> {
        if !file.is_submittable() {
            return Err(ClientError::InvalidRequest(
                "a named, non-empty file is required".to_string(),
            ));
        }

        self.presenter.on_pending(WAITING_PLACEHOLDER);
        self.presenter.on_status_changed(
            LocalStatus::Submitting.as_str(),
            &format!("file: {}", file.name),
        );
        self.presenter.on_log_line(&format!(
            "submitting: {} ({} KB)",
            file.name,
            file.size_kb()
        ));

        let job = match self.api.submit(file).await {
            Ok(resp) => Job::from(resp),
            Err(e) => {
                warn!("Submit of {} failed: {}", file.name, e);
                self.presenter.on_log_line(&format!("submit error: {}", e));
                self.presenter
                    .on_status_changed(LocalStatus::Error.as_str(), &e.to_string());
                self.presenter.on_error(&e.to_string());
                self.presenter.on_failed(SUBMIT_FAILED_PLACEHOLDER);
                return Err(e);
            }
        };

        info!("Submitted {} as job {}", file.name, job.job_id);
        self.presenter
            .on_log_line(&format!("submitted: job_id={}", job.job_id));
        self.presenter.on_job_submitted(&job.job_id);
        self.presenter
            .on_status_changed(job.status.as_str(), &format!("job_id: {}", job.job_id));

        self.start_polling(job.job_id.clone());

        Ok(job)
    }

    /// Starts polling the job id currently entered in the presenter
    ///
    /// Returns `false` without doing anything when no id is entered.
    pub fn watch_current(&self) -> bool {
        match self.presenter.current_job_id() {
            Some(job_id) => self.watch(&job_id),
            None => false,
        }
    }

    /// Starts polling `job_id` on user request
    ///
    /// The id is trimmed; an empty id is ignored and returns `false`.
    pub fn watch(&self, job_id: &str) -> bool {
        let job_id = job_id.trim();
        if job_id.is_empty() {
            return false;
        }

        self.presenter.on_pending(WAITING_PLACEHOLDER);
        self.presenter
            .on_status_changed(LocalStatus::Polling.as_str(), &format!("job_id: {}", job_id));
        self.presenter
            .on_log_line(&format!("poll start: job_id={}", job_id));

        self.start_polling(job_id);
        true
    }

    /// Starts the poll loop for `job_id`, cancelling any active one
    ///
    /// The first cycle runs immediately, then one per poll interval. Must be
    /// called within a tokio runtime.
    pub fn start_polling(&self, job_id: impl Into<String>) {
        let job_id = job_id.into();
        let mut active = self.lock_active();

        if let Some(previous) = active.take() {
            debug!("Cancelling poll loop for job {}", previous.job_id);
            previous.cancel.cancel();
        }

        let cancel = CancellationToken::new();
        let (finished_tx, finished) = watch::channel(false);

        let poll_loop = PollLoop {
            job_id: job_id.clone(),
            api: Arc::clone(&self.api),
            presenter: Arc::clone(&self.presenter),
            interval: self.poll_interval,
            cancel: cancel.clone(),
        };

        info!(
            "Starting poll loop for job {} (interval: {:?})",
            job_id, self.poll_interval
        );

        tokio::spawn(async move {
            poll_loop.run().await;
            let _ = finished_tx.send(true);
        });

        *active = Some(ActivePoll {
            job_id,
            cancel,
            finished,
        });
    }

    /// Stops the active poll loop, if any
    ///
    /// Only future cycles are prevented: a cycle already in flight still
    /// completes and reports its outcome.
    pub fn stop_polling(&self) {
        if let Some(previous) = self.lock_active().take() {
            debug!("Stopping poll loop for job {}", previous.job_id);
            previous.cancel.cancel();
        }
    }

    /// Stops polling on user request and reports the idle state
    pub fn stop(&self) {
        self.presenter.on_log_line("poll stopped");
        self.presenter
            .on_status_changed(LocalStatus::Idle.as_str(), "");
        self.presenter.on_stopped();
        self.stop_polling();
    }

    /// Whether a poll loop is still running
    pub fn is_polling(&self) -> bool {
        self.lock_active()
            .as_ref()
            .is_some_and(|active| !*active.finished.borrow())
    }

    /// The job id of the running poll loop
    pub fn active_job_id(&self) -> Option<String> {
        self.lock_active()
            .as_ref()
            .filter(|active| !*active.finished.borrow())
            .map(|active| active.job_id.clone())
    }

    /// Waits until the poll loop active at call time has ended
    ///
    /// Returns immediately when nothing is polling.
    pub async fn wait(&self) {
        let finished = self
            .lock_active()
            .as_ref()
            .map(|active| active.finished.clone());

        if let Some(mut finished) = finished {
            // A closed channel means the loop task is gone as well.
            let _ = finished.wait_for(|done| *done).await;
        }
    }

    /// Runs a single poll cycle for `job_id` outside of any loop
    pub async fn poll_once(&self, job_id: &str) -> Result<CycleOutcome> {
        run_cycle(self.api.as_ref(), self.presenter.as_ref(), job_id).await
    }

    fn lock_active(&self) -> MutexGuard<'_, Option<ActivePoll>> {
        self.active.lock().unwrap()
    }
}

impl Drop for JobPoller {
    fn drop(&mut self) {
        self.stop_polling();
    }
}

/// State moved into a spawned poll loop task
struct PollLoop {
    job_id: String,
    api: Arc<dyn JobApi>,
    presenter: Arc<dyn Presenter>,
    interval: Duration,
    cancel: CancellationToken,
}

impl PollLoop {
    async fn run(self) {
        let mut ticker = time::interval(self.interval);
        // Cycles run back to back in this task; ticks missed while one is
        // outstanding are dropped rather than queued.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    debug!("Poll loop for job {} cancelled", self.job_id);
                    break;
                }
                _ = ticker.tick() => {}
            }

            debug!("Polling status of job {}", self.job_id);

            match run_cycle(self.api.as_ref(), self.presenter.as_ref(), &self.job_id).await {
                Ok(outcome) if outcome.is_terminal() => {
                    info!("Job {} finished: {:?}", self.job_id, outcome);
                    break;
                }
                Ok(outcome) => {
                    debug!("Job {} not finished: {:?}", self.job_id, outcome);
                }
                Err(e) => {
                    warn!("Poll cycle for job {} failed: {}", self.job_id, e);
                    self.presenter.on_log_line(&format!("poll error: {}", e));
                    self.presenter
                        .on_status_changed(LocalStatus::Error.as_str(), &e.to_string());
                    self.presenter.on_error(&e.to_string());
                    break;
                }
            }
        }
    }
}

/// Text shown for a ready result
///
/// A missing or empty description becomes [`NO_DESCRIPTION_PLACEHOLDER`].
pub fn result_text(result: ResultResponse) -> String {
    result
        .description
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION_PLACEHOLDER.to_string())
}

/// One status check, plus a result fetch when the status is `done`
async fn run_cycle(
    api: &dyn JobApi,
    presenter: &dyn Presenter,
    job_id: &str,
) -> Result<CycleOutcome> {
    let job = Job::from_status(job_id, api.status(job_id).await?);

    let meta = match (&job.status, &job.error) {
        (JobStatus::Failed, Some(error)) => format!("error: {}", error),
        _ => format!("job_id: {}", job.job_id),
    };
    presenter.on_status_changed(job.status.as_str(), &meta);
    presenter.on_log_line(&format!("status: {}", job.status));

    match &job.status {
        JobStatus::Failed => {
            presenter.on_failed(JOB_FAILED_PLACEHOLDER);
            Ok(CycleOutcome::Failed(job))
        }
        JobStatus::Done => match api.result(job_id).await? {
            ResultOutcome::Pending(message) => {
                presenter.on_pending(&message);
                presenter.on_log_line(&format!("result pending: {}", message));
                Ok(CycleOutcome::ResultPending(message))
            }
            ResultOutcome::Ready(result) => {
                let description = result_text(result);
                presenter.on_result(&description);
                presenter.on_log_line("result: received description");
                Ok(CycleOutcome::Completed(job.with_description(description)))
            }
        },
        other => Ok(CycleOutcome::InProgress(other.clone())),
    }
}
