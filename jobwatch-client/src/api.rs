//! Job service abstraction
//!
//! The poller depends on this trait rather than on the HTTP client so it
//! can be driven by a scripted service in tests.

use async_trait::async_trait;
use jobwatch_core::domain::upload::UploadFile;
use jobwatch_core::dto::job::{ResultOutcome, StatusResponse, SubmitResponse};

use crate::JobServiceClient;
use crate::error::Result;

/// The three calls the poller makes against the job service
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Upload a file and create a job
    async fn submit(&self, file: &UploadFile) -> Result<SubmitResponse>;

    /// Fetch a job's status
    async fn status(&self, job_id: &str) -> Result<StatusResponse>;

    /// Fetch a job's result, tolerating the 202 pending race
    async fn result(&self, job_id: &str) -> Result<ResultOutcome>;
}

#[async_trait]
impl JobApi for JobServiceClient {
    async fn submit(&self, file: &UploadFile) -> Result<SubmitResponse> {
        self.submit_job(file).await
    }

    async fn status(&self, job_id: &str) -> Result<StatusResponse> {
        self.get_job_status(job_id).await
    }

    async fn result(&self, job_id: &str) -> Result<ResultOutcome> {
        self.get_job_result(job_id).await
    }
}
