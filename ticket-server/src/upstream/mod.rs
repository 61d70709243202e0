//! Upstream ticket query: request building, transfer, and decoding.
//!
//! Key characteristics of the upstream:
//! - Parameters must be sent in a fixed order
//! - A `status: false` envelope is a rejection even under HTTP 200
//! - Each train is one `|`-delimited string of at least 40 positional
//!   fields; the seat-info field packs fixed-width fare segments

mod client;
mod error;
#[cfg(test)]
pub(crate) mod fake;
mod record;
mod request;
mod types;

pub use client::{
    DEFAULT_QUERY_URL, DEFAULT_USER_AGENT, TicketSource, UpstreamClient, UpstreamConfig,
};
pub use error::UpstreamError;
pub use record::{MIN_FIELDS, RecordError, decode_record, decode_seat_offers};
pub use request::TicketRequest;
pub use types::{Messages, QueryData, QueryEnvelope, parse_envelope};
