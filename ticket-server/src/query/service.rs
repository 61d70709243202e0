//! Ticket query orchestration.
//!
//! A query moves through four stages, failing at the first one that cannot
//! complete:
//!
//! 1. Validate the user input
//! 2. Resolve both stations against the registry
//! 3. Fetch the raw response under a timeout
//! 4. Decode the envelope and each record, skipping malformed records

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use serde_json::Value;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::domain::Ticket;
use crate::stations::StationRegistry;
use crate::upstream::{
    RecordError, TicketRequest, TicketSource, UpstreamError, decode_record, parse_envelope,
};

use super::error::QueryError;

/// Default bound on a single upstream fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Date format accepted from users.
const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;

/// User-supplied query parameters, as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput {
    /// Boarding station name or code
    pub from_station: String,
    /// Alighting station name or code
    pub to_station: String,
    /// Travel date, `YYYY-MM-DD`
    pub date: String,
}

impl QueryInput {
    /// Create a new query input.
    pub fn new(
        from_station: impl Into<String>,
        to_station: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            from_station: from_station.into(),
            to_station: to_station.into(),
            date: date.into(),
        }
    }
}

/// A record that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// Position in the upstream result list
    pub index: usize,
    pub error: RecordError,
}

/// Decoded tickets plus the records that were skipped.
#[derive(Debug, Clone, Default)]
pub struct DecodeOutcome {
    pub tickets: Vec<Ticket>,
    pub skipped: Vec<SkippedRecord>,
}

/// Decode every raw record, keeping the good ones in source order.
///
/// Non-string elements count as malformed.
pub fn decode_results(
    records: &[Value],
    date: NaiveDate,
    registry: &StationRegistry,
) -> DecodeOutcome {
    records
        .iter()
        .enumerate()
        .fold(DecodeOutcome::default(), |mut outcome, (index, raw)| {
            let decoded = raw
                .as_str()
                .ok_or(RecordError::NotText)
                .and_then(|raw| decode_record(raw, date, registry));

            match decoded {
                Ok(ticket) => outcome.tickets.push(ticket),
                Err(error) => {
                    warn!(index, %error, "skipping malformed record");
                    outcome.skipped.push(SkippedRecord { index, error });
                }
            }
            outcome
        })
}

/// Answers ticket queries against a shared registry and a ticket source.
#[derive(Debug)]
pub struct TicketService<S> {
    registry: Arc<StationRegistry>,
    source: S,
    fetch_timeout: Duration,
}

impl<S: TicketSource> TicketService<S> {
    /// Create a new service with the default fetch timeout.
    pub fn new(registry: Arc<StationRegistry>, source: S) -> Self {
        Self {
            registry,
            source,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Set the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// The station registry queries resolve against.
    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    /// The ticket source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run a query, judging the date against today's local date.
    pub async fn query(&self, input: &QueryInput) -> Result<Vec<Ticket>, QueryError> {
        self.query_as_of(input, Local::now().date_naive()).await
    }

    /// Run a query, judging the date against `today`.
    pub async fn query_as_of(
        &self,
        input: &QueryInput,
        today: NaiveDate,
    ) -> Result<Vec<Ticket>, QueryError> {
        let span = info_span!(
            "ticket_query",
            from = %input.from_station,
            to = %input.to_station,
            date = %input.date,
        );

        async {
            let result = self.run(input, today).await;
            match &result {
                Ok(tickets) => info!(tickets = tickets.len(), "query complete"),
                Err(e) => info!(stage = %e.stage(), error = %e, "query failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        input: &QueryInput,
        today: NaiveDate,
    ) -> Result<Vec<Ticket>, QueryError> {
        let (from, to, date) = validate(input, today)?;

        let request = TicketRequest::new(
            date,
            self.registry.resolve(from)?,
            self.registry.resolve(to)?,
        );
        debug!(from = %request.from, to = %request.to, "resolved stations");

        let body = tokio::time::timeout(self.fetch_timeout, self.source.fetch(&request))
            .await
            .map_err(|_| UpstreamError::Timeout(self.fetch_timeout))??;

        let records = parse_envelope(&body)?;
        let outcome = decode_results(&records, date, &self.registry);
        debug!(
            records = records.len(),
            skipped = outcome.skipped.len(),
            "decoded results"
        );

        if outcome.tickets.is_empty() {
            return Err(QueryError::NoTicketsFound {
                skipped: outcome.skipped.len(),
            });
        }

        Ok(outcome.tickets)
    }
}

/// Check the input, returning the station identifiers and the date.
///
/// Identifiers are returned as given; resolution is an exact match.
fn validate(
    input: &QueryInput,
    today: NaiveDate,
) -> Result<(&str, &str, NaiveDate), QueryError> {
    let from = non_empty("from_station", &input.from_station)?;
    let to = non_empty("to_station", &input.to_station)?;
    let date_text = non_empty("date", &input.date)?;

    let date = parse_date(date_text).ok_or_else(|| {
        QueryError::validation("date", format!("{date_text:?} is not YYYY-MM-DD"))
    })?;

    if date < today {
        return Err(QueryError::validation(
            "date",
            format!("{date} is before today ({today})"),
        ));
    }

    Ok((from, to, date))
}

/// Parse a zero-padded `YYYY-MM-DD` date.
///
/// chrono accepts unpadded months and days, so the length is checked first.
fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.len() != DATE_LEN {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

fn non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str, QueryError> {
    if value.trim().is_empty() {
        return Err(QueryError::validation(field, "must not be empty"));
    }
    Ok(value)
}
