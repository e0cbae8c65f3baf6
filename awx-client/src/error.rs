//! Error types for the AWX client

use awx_core::domain::job::Job;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the AWX client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to decode or encode a body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Mandatory fields were absent from a create payload
    #[error("Mandatory input arguments are absent: {}", missing.join(", "))]
    ValidationError {
        /// Names of the missing fields, in declaration order
        missing: Vec<String>,
    },

    /// A launch did not produce a usable job id
    #[error("Launch did not produce a job: {0}")]
    LaunchFailed(String),

    /// The job was still in flight after the configured number of polls
    #[error("The maximum number {attempts} of checking job {job_id} status has been reached")]
    AttemptsExhausted {
        job_id: u64,
        /// Polls performed before giving up
        attempts: u32,
        /// Snapshot returned by the final poll
        last: Box<Job>,
    },

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The watch was cancelled before the job reached a terminal state
    #[error("Watch of job {job_id} was cancelled")]
    Cancelled { job_id: u64 },

    /// The caller stopped waiting for the watch
    #[error("Job {job_id} did not finish within {after:?}")]
    Timeout { job_id: u64, after: Duration },

    /// The background watch ended without delivering an outcome
    #[error("Watch of job {job_id} ended without an outcome")]
    WatcherAborted { job_id: u64 },
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error happened at the transport boundary (network or decoding)
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::RequestFailed(_) | Self::ParseError(_))
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Last job snapshot observed before the error, when one was kept
    pub fn last_snapshot(&self) -> Option<&Job> {
        match self {
            Self::AttemptsExhausted { last, .. } => Some(&**last),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(ClientError::api_error(404, "missing").is_not_found());
        assert!(ClientError::api_error(400, "bad").is_client_error());
        assert!(!ClientError::api_error(400, "bad").is_server_error());
        assert!(ClientError::api_error(502, "gateway").is_server_error());
        assert!(ClientError::NotFound("x".into()).is_not_found());
    }

    #[test]
    fn test_transport_classification() {
        assert!(ClientError::ParseError("eof".into()).is_transport_error());
        assert!(!ClientError::api_error(500, "boom").is_transport_error());
        assert!(!ClientError::LaunchFailed("invalid job id 0".into()).is_transport_error());
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let err = ClientError::ValidationError {
            missing: vec!["inventory".into(), "project".into()],
        };
        assert_eq!(
            err.to_string(),
            "Mandatory input arguments are absent: inventory, project"
        );
    }
}
