//! Error types for the school API client
//!
//! Transport failures and HTTP error statuses are kept apart so the
//! deletion workflow can classify them. Raw response bodies are carried
//! verbatim for diagnostics.

use thiserror::Error;

/// Errors raised while talking to the school API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response was received (connect failure, timeout, DNS).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx body could not be deserialized.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid request path '{0}'")]
    Url(String),

    /// A record id that cannot address a single record (empty, `.` or `..`).
    #[error("Invalid record id '{0}'")]
    InvalidId(String),
}

impl ApiError {
    /// HTTP status code, if the server responded at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response payload, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Message the server put in the error body.
    ///
    /// Looks at the `message` field first, then `error`. The body is read
    /// for display only; anything that is not a JSON object yields `None`.
    pub fn server_message(&self) -> Option<String> {
        let body = self.body()?;
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        ["message", "error"].iter().find_map(|field| {
            value
                .get(field)
                .and_then(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
        })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Url(err.to_string())
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid API base URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("Invalid timeout '{value}': expected a positive number of seconds")]
    InvalidTimeout { value: String },
}
