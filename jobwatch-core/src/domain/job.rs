//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dto::job::{StatusResponse, SubmitResponse};

/// A job tracked by the client
///
/// Created from the submit response, then rebuilt from each status poll
/// (`from_status`) and given its description once the result is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub job_id: String,
    pub status: JobStatus,
    pub error: Option<String>,
    pub description: Option<String>,
}

impl Job {
    /// Creates a freshly submitted job in the given status
    pub fn new(job_id: impl Into<String>, status: JobStatus) -> Self {
        Self {
            job_id: job_id.into(),
            status,
            error: None,
            description: None,
        }
    }

    /// Builds the job seen by a status poll of `polled_id`
    ///
    /// The server's `job_id` wins when present.
    pub fn from_status(polled_id: &str, resp: StatusResponse) -> Self {
        Self {
            job_id: resp.job_id.unwrap_or_else(|| polled_id.to_string()),
            status: resp.status,
            error: resp.error,
            description: None,
        }
    }

    /// Attaches the fetched result description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether the job reached `done` or `failed`
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl From<SubmitResponse> for Job {
    fn from(resp: SubmitResponse) -> Self {
        // The server may omit the initial status; a submitted job is queued.
        Job::new(resp.job_id, resp.status.unwrap_or(JobStatus::Queued))
    }
}

/// Job status as reported by the server
///
/// The set is open-ended: unknown strings are kept verbatim in `Other` and
/// treated as non-terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Queued,
    Processing,
    Done,
    Failed,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Done => "done",
            JobStatus::Failed => "failed",
            JobStatus::Other(s) => s,
        }
    }

    /// Terminal statuses end polling
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "queued" => JobStatus::Queued,
            "processing" => JobStatus::Processing,
            "done" => JobStatus::Done,
            "failed" => JobStatus::Failed,
            _ => JobStatus::Other(s),
        }
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        JobStatus::from(s.to_string())
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-local presentation states
///
/// These never come from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalStatus {
    Submitting,
    Polling,
    Idle,
    Error,
}

impl LocalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocalStatus::Submitting => "submitting",
            LocalStatus::Polling => "polling",
            LocalStatus::Idle => "idle",
            LocalStatus::Error => "error",
        }
    }
}

impl fmt::Display for LocalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
