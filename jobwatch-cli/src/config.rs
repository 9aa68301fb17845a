//! Configuration module
//!
//! Turns command-line settings into a validated poller configuration.

use anyhow::{Context, Result};
use jobwatch_poller::Config;
use std::time::Duration;

pub use jobwatch_poller::config::DEFAULT_SERVER_URL;

/// Builds the poller configuration from CLI arguments
pub fn load(server_url: String, interval_ms: u64, timeout_ms: Option<u64>) -> Result<Config> {
    let mut config = Config::new(server_url).with_poll_interval(Duration::from_millis(interval_ms));
    if let Some(timeout_ms) = timeout_ms {
        config = config.with_request_timeout(Duration::from_millis(timeout_ms));
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = load(DEFAULT_SERVER_URL.to_string(), 1200, None).unwrap();
        assert_eq!(config.poll_interval, Duration::from_millis(1200));
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_load_with_timeout() {
        let config = load("https://jobs.example.com".to_string(), 500, Some(2000)).unwrap();
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        assert!(load("ftp://jobs".to_string(), 1200, None).is_err());
        assert!(load(DEFAULT_SERVER_URL.to_string(), 0, None).is_err());
    }
}
