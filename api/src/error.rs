//! Error types for the backend API client

use thiserror::Error;

/// Errors that can occur when talking to the booking backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed before a response arrived (DNS, connect, timeout)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be decoded
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Unauthorized - missing or expired session token
    #[error("Unauthorized - missing or expired session token")]
    Unauthorized,

    /// Backend answered with a `{success: false}` envelope
    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    /// Backend returned an unexpected HTTP status
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the backend
        message: String,
    },
}
