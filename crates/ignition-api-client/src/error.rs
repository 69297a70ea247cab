//! Error taxonomy of the gateway client.
//!
//! The `Display` strings of [`ClientError::EmptyBody`], [`ClientError::Unmarshal`],
//! [`ClientError::Api`] and [`ClientError::Status`] are relied upon by callers
//! and must stay stable.

use ignition_api_model::ApiErrorBody;
use std::time::Duration;

/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, or retries exhausted
    Transport,
    /// Non-2xx with a structured error body
    Api,
    /// Non-2xx with an unrecognized body
    Status,
    /// 2xx whose body is not an accepted reply shape
    Decode,
    /// Per-request time budget spent
    Timeout,
    /// Caller cancelled the operation
    Cancelled,
    /// Caller's deadline passed
    DeadlineExceeded,
    /// Invalid client configuration
    Config,
}

/// Errors that can occur with the gateway client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Client construction failed
    #[error("client config error: {0}")]
    Config(String),
    /// Request could not be sent or its response not read
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    /// Retriable failures persisted past the retry budget
    #[error("giving up after {attempts} attempt(s): {last}")]
    RetriesExhausted {
        /// Attempts made, including the first
        attempts: u32,
        /// Rendering of the last failure
        last: String,
    },
    /// Gateway reported a structured error
    #[error("{0}")]
    Api(ApiErrorBody),
    /// Gateway returned a non-2xx status with an unrecognized body
    #[error("status: {status}, body: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },
    /// 2xx reply without a body where one was required
    #[error("empty response body")]
    EmptyBody,
    /// 2xx reply that matches none of the accepted shapes
    #[error("failed to unmarshal response: {0}")]
    Unmarshal(String),
    /// Change-set reply without any change records
    #[error("change set contained no changes")]
    EmptyChangeSet,
    /// Change-set reply whose first record has no name
    #[error("change set did not name the affected resource")]
    UnnamedChange,
    /// Request body could not be serialized
    #[error("failed to serialize request: {0}")]
    Serialize(String),
    /// Per-request time budget spent
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// Caller cancelled the operation
    #[error("operation cancelled")]
    Cancelled,
    /// Caller's deadline passed
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl ClientError {
    /// Classify the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Request(_) | Self::RetriesExhausted { .. } => ErrorKind::Transport,
            Self::Api(_) => ErrorKind::Api,
            Self::Status { .. } => ErrorKind::Status,
            Self::EmptyBody
            | Self::Unmarshal(_)
            | Self::EmptyChangeSet
            | Self::UnnamedChange
            | Self::Serialize(_) => ErrorKind::Decode,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::DeadlineExceeded => ErrorKind::DeadlineExceeded,
        }
    }

    /// Build the error for a non-2xx response.
    #[must_use]
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        match ApiErrorBody::parse(body) {
            Some(api) => Self::Api(api),
            None => Self::Status {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }

    /// Structured error details, if the gateway sent any.
    #[must_use]
    pub fn api_error(&self) -> Option<&ApiErrorBody> {
        match self {
            Self::Api(body) => Some(body),
            _ => None,
        }
    }

    /// HTTP status for status-class failures without a structured body.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
