//! Upstream ticket-query response DTOs.
//!
//! The envelope is loosely typed upstream; fields are optional here and a
//! type mismatch fails deserialization instead of being guessed at.

use serde::Deserialize;
use serde_json::Value;

use super::error::UpstreamError;

/// Parse a response body and extract its raw result records.
///
/// Fails if the body is not an envelope, upstream rejected the query, or
/// the result list is missing. An empty list is returned as-is.
pub fn parse_envelope(body: &[u8]) -> Result<Vec<Value>, UpstreamError> {
    let envelope: QueryEnvelope =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Json {
            message: e.to_string(),
        })?;

    if !envelope.status {
        return Err(UpstreamError::Rejected {
            message: envelope.rejection_message(),
        });
    }

    envelope
        .data
        .and_then(|data| data.result)
        .ok_or(UpstreamError::MissingResult)
}

/// Top-level response from the ticket query endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryEnvelope {
    /// Whether upstream accepted the query. Absent means rejected.
    #[serde(default)]
    pub status: bool,

    /// Upstream's own HTTP-like status code, when present.
    #[serde(rename = "httpstatus")]
    pub http_status: Option<u16>,

    /// Error or informational messages.
    pub messages: Option<Messages>,

    /// Query payload. Only meaningful when `status` is true.
    pub data: Option<QueryData>,
}

impl QueryEnvelope {
    /// The message to report when upstream rejects a query.
    pub fn rejection_message(&self) -> String {
        self.messages
            .as_ref()
            .and_then(Messages::first)
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

/// Upstream sends `messages` either as a single string or as a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Messages {
    Text(String),
    List(Vec<Value>),
}

impl Messages {
    /// The first non-empty message, if any.
    pub fn first(&self) -> Option<String> {
        match self {
            Messages::Text(text) if !text.is_empty() => Some(text.clone()),
            Messages::Text(_) => None,
            Messages::List(items) => items.first().map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
        }
    }
}

/// The `data` object of a query response.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryData {
    /// One `|`-delimited record per train. Elements are kept as raw JSON so a
    /// single non-string element can be skipped rather than failing the list.
    pub result: Option<Vec<Value>>,
}
