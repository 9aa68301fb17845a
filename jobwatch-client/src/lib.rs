//! Jobwatch HTTP Client
//!
//! A small, type-safe HTTP client for the job service's three endpoints:
//! submit a file, check a job's status, fetch a finished job's result.
//!
//! # Example
//!
//! ```no_run
//! use jobwatch_client::JobServiceClient;
//! use jobwatch_core::domain::upload::UploadFile;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JobServiceClient::new("http://localhost:8000");
//!
//!     let file = UploadFile::from_path("cat.jpg").await?;
//!     let submitted = client.submit_job(&file).await?;
//!
//!     println!("Submitted job: {}", submitted.job_id);
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod jobs;

// Re-export commonly used types
pub use api::JobApi;
pub use error::{ClientError, Endpoint, Result};
pub use jobwatch_core::dto::job::ResultOutcome;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the job service API
#[derive(Debug, Clone)]
pub struct JobServiceClient {
    /// Base URL of the job service (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl JobServiceClient {
    /// Create a new job service client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the job service (e.g., "http://localhost:8000")
    ///
    /// # Example
    /// ```
    /// use jobwatch_client::JobServiceClient;
    ///
    /// let client = JobServiceClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new job service client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use jobwatch_client::JobServiceClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = JobServiceClient::with_client("http://localhost:8000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client whose requests give up after `timeout`
    ///
    /// `None` keeps reqwest's default of waiting indefinitely.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(base_url, builder.build()?))
    }

    /// Get the base URL of the job service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL from path segments
    ///
    /// Each segment is percent-encoded on its own, so a job id containing
    /// `/` or `?` stays a single segment.
    fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidRequest(format!("invalid server URL {}: {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidRequest(format!(
                    "server URL cannot be a base: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Read a response body as text, keeping the status code
    async fn read_body(response: reqwest::Response) -> Result<(StatusCode, String)> {
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }

    /// Check the status code and decode the JSON body
    ///
    /// Non-2xx responses become the endpoint's error with the body text as
    /// message; a 2xx body that is not valid JSON becomes a decode error.
    async fn handle_response<T: DeserializeOwned>(
        endpoint: Endpoint,
        response: reqwest::Response,
    ) -> Result<T> {
        let (status, body) = Self::read_body(response).await?;

        if !status.is_success() {
            return Err(ClientError::api_error(endpoint, status.as_u16(), body));
        }

        decode(endpoint, &body)
    }
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| ClientError::Decode { endpoint, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = JobServiceClient::new("http://localhost:8000");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = JobServiceClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_with_timeout() {
        let client =
            JobServiceClient::with_timeout("http://localhost:8000", Some(Duration::from_secs(5)))
                .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_endpoint_url_encodes_job_id() {
        let client = JobServiceClient::new("http://localhost:8000");
        let url = client.endpoint_url(&["status", "a b/c?d"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/status/a%20b%2Fc%3Fd");
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let client = JobServiceClient::new("http://localhost:8000/api/");
        let url = client.endpoint_url(&["result", "abc"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/result/abc");
    }

    #[test]
    fn test_endpoint_url_rejects_malformed_base() {
        let client = JobServiceClient::new("not a url");
        let err = client.endpoint_url(&["submit"]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[test]
    fn test_decode_reports_endpoint() {
        let err = decode::<jobwatch_core::dto::job::StatusResponse>(Endpoint::Status, "<html>")
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Decode {
                endpoint: Endpoint::Status,
                ..
            }
        ));
    }
}
