//! Job-related API endpoints

use jobwatch_core::domain::upload::UploadFile;
use jobwatch_core::dto::job::{ResultOutcome, StatusResponse, SubmitResponse};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::JobServiceClient;
use crate::error::{ClientError, Endpoint, Result};

impl JobServiceClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Submit a file for processing
    ///
    /// Sends the file as the `file` field of a multipart body.
    ///
    /// # Returns
    /// The new job's id and initial status
    ///
    /// # Example
    /// ```no_run
    /// # use jobwatch_client::JobServiceClient;
    /// # use jobwatch_core::domain::upload::UploadFile;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = JobServiceClient::new("http://localhost:8000");
    /// let file = UploadFile::new("cat.png", std::fs::read("cat.png")?);
    /// let submitted = client.submit_job(&file).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit_job(&self, file: &UploadFile) -> Result<SubmitResponse> {
        if !file.is_submittable() {
            return Err(ClientError::InvalidRequest(
                "a named, non-empty file is required".to_string(),
            ));
        }

        let url = self.endpoint_url(&["submit"])?;
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(file.content_type())?;
        let form = Form::new().part("file", part);

        debug!("Submitting {} ({} bytes) to {}", file.name, file.size(), url);
        let response = self.client.post(url).multipart(form).send().await?;

        Self::handle_response(Endpoint::Submit, response).await
    }

    /// Get the current status of a job
    ///
    /// # Arguments
    /// * `job_id` - The opaque job id returned by submit
    pub async fn get_job_status(&self, job_id: &str) -> Result<StatusResponse> {
        let url = self.endpoint_url(&["status", job_id])?;
        let response = self.client.get(url).send().await?;

        Self::handle_response(Endpoint::Status, response).await
    }

    /// Get the result of a finished job
    ///
    /// HTTP 202 means the result is not stored yet and is returned as
    /// [`ResultOutcome::Pending`] with the response body, not as an error.
    pub async fn get_job_result(&self, job_id: &str) -> Result<ResultOutcome> {
        let url = self.endpoint_url(&["result", job_id])?;
        let response = self.client.get(url).send().await?;

        let (status, body) = Self::read_body(response).await?;

        if status == StatusCode::ACCEPTED {
            debug!("Result for job {} still pending", job_id);
            return Ok(ResultOutcome::Pending(body));
        }

        if !status.is_success() {
            return Err(ClientError::api_error(
                Endpoint::Result,
                status.as_u16(),
                body,
            ));
        }

        crate::decode(Endpoint::Result, &body).map(ResultOutcome::Ready)
    }
}
