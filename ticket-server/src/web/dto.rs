//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{SeatOffer, Ticket};
use crate::query::{QueryInput, QueryStage};

/// Timestamp format in responses.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Request to search for tickets.
///
/// Missing parameters deserialize as empty so they fail query validation
/// with a field name rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct TicketSearchRequest {
    /// Boarding station name or code
    #[serde(default)]
    pub from_station: String,

    /// Alighting station name or code
    #[serde(default)]
    pub to_station: String,

    /// Travel date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
}

impl From<TicketSearchRequest> for QueryInput {
    fn from(req: TicketSearchRequest) -> Self {
        QueryInput::new(req.from_station, req.to_station, req.date)
    }
}

/// A train in search results.
#[derive(Debug, Serialize)]
pub struct TicketResult {
    pub train_number: String,
    pub from_station: String,
    pub to_station: String,

    /// Local departure time
    pub departure: String,

    /// Local arrival time
    pub arrival: String,

    /// Duration as reported upstream, e.g. `04:30`
    pub duration: String,

    /// Seat offers in upstream order
    pub seats: Vec<SeatResult>,

    /// Seats left across all classes
    pub total_seats: u32,

    /// Lowest fare with a seat left
    pub cheapest_price: Option<f64>,
}

/// One seat class on a train.
#[derive(Debug, Serialize)]
pub struct SeatResult {
    pub seat_class: String,
    pub count: u32,
    pub price: f64,
}

/// Response for ticket search.
#[derive(Debug, Serialize)]
pub struct TicketSearchResponse {
    pub tickets: Vec<TicketResult>,
}

/// Request to resolve a station name or code.
#[derive(Debug, Deserialize)]
pub struct StationResolveRequest {
    #[serde(default)]
    pub q: String,
}

/// A resolved station.
#[derive(Debug, Serialize)]
pub struct StationResolveResponse {
    pub code: String,

    /// Absent for well-formed codes the registry does not know
    pub name: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Query stage that failed, for ticket queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<QueryStage>,
}

// Conversion implementations

impl From<&Ticket> for TicketResult {
    fn from(ticket: &Ticket) -> Self {
        Self {
            train_number: ticket.train_number.clone(),
            from_station: ticket.from_station_name.clone(),
            to_station: ticket.to_station_name.clone(),
            departure: ticket.departure.format(TIMESTAMP_FORMAT).to_string(),
            arrival: ticket.arrival.format(TIMESTAMP_FORMAT).to_string(),
            duration: ticket.duration_text.clone(),
            seats: ticket.seat_offers.iter().map(SeatResult::from).collect(),
            total_seats: ticket.total_seats(),
            cheapest_price: ticket.cheapest_available().map(|offer| offer.price),
        }
    }
}

impl From<&SeatOffer> for SeatResult {
    fn from(offer: &SeatOffer) -> Self {
        Self {
            seat_class: offer.seat_class.clone(),
            count: offer.count,
            price: offer.price,
        }
    }
}
