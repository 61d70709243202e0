//! Upstream client error types.

use std::time::Duration;

/// Errors from fetching or reading a ticket query response.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed (connection, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No response within the fetch timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Upstream returned a non-success status code
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Upstream returned a success status with no body
    #[error("empty response body")]
    EmptyBody,

    /// Every candidate endpoint failed
    #[error("all {attempts} query endpoints failed, last error: {last}")]
    Exhausted {
        attempts: usize,
        last: Box<UpstreamError>,
    },

    /// Client misconfigured (no endpoints, invalid header values)
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Response body is not the expected envelope
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Upstream answered with `status: false`
    #[error("upstream rejected query: {message}")]
    Rejected { message: String },

    /// Envelope has no `data.result` list
    #[error("response has no result list")]
    MissingResult,
}

impl UpstreamError {
    /// Whether the error arose while transferring bytes, as opposed to
    /// interpreting a response that did arrive.
    pub fn is_transport(&self) -> bool {
        !matches!(
            self,
            UpstreamError::Json { .. }
                | UpstreamError::Rejected { .. }
                | UpstreamError::MissingResult
        )
    }
}
