//! Station lookup error types.

/// A user-supplied station identifier matched neither a name nor a code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("station not found: {identifier}")]
pub struct StationNotFound {
    identifier: String,
}

impl StationNotFound {
    pub(crate) fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    /// The identifier that failed to resolve.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// Errors that can occur when loading the station registry.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Registry endpoint returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Client misconfigured (invalid header values)
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Registry file could not be read
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}
