//! Poller configuration
//!
//! Defines the configurable parameters of the poller: the job service
//! location, how often to poll, and an optional per-request timeout.

use anyhow::Context;
use jobwatch_client::JobServiceClient;
use std::time::Duration;

/// Default job service location
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Default delay between two poll cycles
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1200);

/// Poller configuration
///
/// The interval and timeout are explicit so that deployments and tests can
/// tune them. No timeout is applied unless one is configured.
#[derive(Debug, Clone)]
pub struct Config {
    /// Job service base URL (e.g., "http://localhost:8000")
    pub server_url: String,

    /// How often to poll the status endpoint
    pub poll_interval: Duration,

    /// Maximum time a single HTTP request may take
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(server_url: String) -> Self {
        Self {
            server_url,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: None,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JOBWATCH_SERVER_URL (optional, default: http://localhost:8000)
    /// - JOBWATCH_POLL_INTERVAL_MS (optional, milliseconds, default: 1200)
    /// - JOBWATCH_REQUEST_TIMEOUT_MS (optional, milliseconds, default: none)
    pub fn from_env() -> anyhow::Result<Self> {
        let server_url = std::env::var("JOBWATCH_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());

        let poll_interval = match std::env::var("JOBWATCH_POLL_INTERVAL_MS") {
            Ok(s) => Duration::from_millis(
                s.parse::<u64>()
                    .context("JOBWATCH_POLL_INTERVAL_MS must be a number of milliseconds")?,
            ),
            Err(_) => DEFAULT_POLL_INTERVAL,
        };

        let request_timeout = match std::env::var("JOBWATCH_REQUEST_TIMEOUT_MS") {
            Ok(s) => Some(Duration::from_millis(
                s.parse::<u64>()
                    .context("JOBWATCH_REQUEST_TIMEOUT_MS must be a number of milliseconds")?,
            )),
            Err(_) => None,
        };

        Ok(Self {
            server_url,
            poll_interval,
            request_timeout,
        })
    }

    /// Sets the poll interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Sets the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server_url.is_empty() {
            anyhow::bail!("server_url cannot be empty");
        }

        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            anyhow::bail!("server_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }

    /// Builds the HTTP client for the configured server
    pub fn build_client(&self) -> anyhow::Result<JobServiceClient> {
        JobServiceClient::with_timeout(self.server_url.clone(), self.request_timeout)
            .context("Failed to build HTTP client")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:8000");
        assert_eq!(config.poll_interval, Duration::from_millis(1200));
        assert!(config.request_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.server_url = String::new();
        assert!(config.validate().is_err());

        config.server_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());

        config.server_url = "https://jobs.example.com".to_string();
        assert!(config.validate().is_ok());

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = Config::default().with_request_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_poll_interval(Duration::from_millis(50))
            .with_request_timeout(Duration::from_secs(3));

        assert_eq!(config.poll_interval, Duration::from_millis(50));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(3)));

        let client = config.build_client().unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }
}
