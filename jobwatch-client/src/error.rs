//! Error types for the jobwatch client

use std::fmt;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// The job service endpoint a request was sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Submit,
    Status,
    Result,
}

impl Endpoint {
    /// Capitalized name used in fallback error messages
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Submit => "Submit",
            Endpoint::Status => "Status",
            Endpoint::Result => "Result",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Submit => f.write_str("/submit"),
            Endpoint::Status => f.write_str("/status"),
            Endpoint::Result => f.write_str("/result"),
        }
    }
}

/// Errors that can occur when talking to the job service
///
/// The three endpoint failures display their message verbatim: it is either
/// the response body or a generic `<Endpoint> failed (<code>)` fallback.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// `POST /submit` answered with a non-2xx status
    #[error("{message}")]
    SubmitFailed { status: u16, message: String },

    /// `GET /status/{id}` answered with a non-2xx status
    #[error("{message}")]
    StatusFailed { status: u16, message: String },

    /// `GET /result/{id}` answered with a non-2xx status other than 202
    #[error("{message}")]
    ResultFailed { status: u16, message: String },

    /// A 2xx response carried a body that is not the expected JSON
    #[error("Failed to parse {endpoint} response: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be built (empty file, malformed server URL)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create the endpoint-specific error for a non-2xx response
    pub fn api_error(endpoint: Endpoint, status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.is_empty() {
            format!("{} failed ({})", endpoint.label(), status)
        } else {
            body
        };

        match endpoint {
            Endpoint::Submit => Self::SubmitFailed { status, message },
            Endpoint::Status => Self::StatusFailed { status, message },
            Endpoint::Result => Self::ResultFailed { status, message },
        }
    }

    /// HTTP status code of an endpoint failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::SubmitFailed { status, .. }
            | Self::StatusFailed { status, .. }
            | Self::ResultFailed { status, .. } => Some(*status),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }

    /// Check if the server answered 2xx with an undecodable body
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
