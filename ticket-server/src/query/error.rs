//! Query failure taxonomy.

use std::fmt;

use serde::Serialize;

use crate::stations::StationNotFound;
use crate::upstream::UpstreamError;

/// The stage a query was in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStage {
    ValidatingInput,
    ResolvingStations,
    Fetching,
    DecodingResults,
}

impl QueryStage {
    /// Stable snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStage::ValidatingInput => "validating_input",
            QueryStage::ResolvingStations => "resolving_stations",
            QueryStage::Fetching => "fetching",
            QueryStage::DecodingResults => "decoding_results",
        }
    }
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ticket query failed.
///
/// Malformed individual records are not represented here; they are skipped
/// and only surface as [`QueryError::NoTicketsFound`] when nothing survives.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Missing or unusable input
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A station identifier did not resolve
    #[error(transparent)]
    StationNotFound(#[from] StationNotFound),

    /// Fetching or reading the upstream response failed
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The query succeeded but no ticket could be decoded
    #[error("no tickets found ({skipped} malformed records skipped)")]
    NoTicketsFound { skipped: usize },
}

impl QueryError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        QueryError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// The stage that failed.
    pub fn stage(&self) -> QueryStage {
        match self {
            QueryError::Validation { .. } => QueryStage::ValidatingInput,
            QueryError::StationNotFound(_) => QueryStage::ResolvingStations,
            QueryError::Upstream(e) if e.is_transport() => QueryStage::Fetching,
            QueryError::Upstream(_) | QueryError::NoTicketsFound { .. } => {
                QueryStage::DecodingResults
            }
        }
    }
}
