//! Job DTOs for the submit/status/result endpoints

use serde::{Deserialize, Serialize};

use crate::domain::job::JobStatus;

/// Body of a successful `POST /submit`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub job_id: String,
    #[serde(default)]
    pub status: Option<JobStatus>,
}

/// Body of a successful `GET /status/{job_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: JobStatus,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of a successful `GET /result/{job_id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultResponse {
    #[serde(default)]
    pub description: Option<String>,
}

/// Outcome of a result fetch
///
/// `Pending` carries the body of an HTTP 202: the status already said
/// `done` but the result is not stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultOutcome {
    Ready(ResultResponse),
    Pending(String),
}
