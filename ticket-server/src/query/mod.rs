//! Ticket query orchestration and its error taxonomy.

mod error;
mod service;

pub use error::{QueryError, QueryStage};
pub use service::{
    DEFAULT_FETCH_TIMEOUT, DecodeOutcome, QueryInput, SkippedRecord, TicketService, decode_results,
};
