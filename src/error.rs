//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// The response decoded as JSON but matched no known shape.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Coarse failure classes a view reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response at all (connect failure, timeout, dropped connection).
    Transport,
    /// The server answered with a non-success status.
    Status,
    /// The body could not be understood.
    Payload,
    /// Rejected client-side before anything was sent.
    Validation,
}

impl SdkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SdkError::Http(e) => e.kind(),
            SdkError::MalformedPayload(_) | SdkError::Serde(_) => ErrorKind::Payload,
            SdkError::Validation(_) => ErrorKind::Validation,
            SdkError::Other(_) => ErrorKind::Transport,
        }
    }

    /// Short message suitable for a toast or inline error banner.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Transport => format!("Could not reach the server: {}", self),
            ErrorKind::Status => format!("The server rejected the request: {}", self),
            ErrorKind::Payload => "Server returned an invalid response format".to_string(),
            ErrorKind::Validation => match self {
                SdkError::Validation(msg) => msg.clone(),
                other => other.to_string(),
            },
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => {
                if e.is_decode() {
                    ErrorKind::Payload
                } else if e.status().is_some() {
                    ErrorKind::Status
                } else {
                    ErrorKind::Transport
                }
            }
            HttpError::ServerError { .. }
            | HttpError::RateLimited { .. }
            | HttpError::Unauthorized
            | HttpError::NotFound(_)
            | HttpError::BadRequest(_) => ErrorKind::Status,
            HttpError::InvalidBody(_) => ErrorKind::Payload,
            HttpError::Timeout | HttpError::MaxRetriesExceeded { .. } => ErrorKind::Transport,
        }
    }
}
