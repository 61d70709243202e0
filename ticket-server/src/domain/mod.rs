//! Domain types for train ticket queries.
//!
//! These are the validated value objects produced by decoding upstream
//! data. `Ticket` and `SeatOffer` are built once and never mutated.

mod seat;
mod station;
mod ticket;
mod time;

pub use seat::{SeatOffer, SeatTypeTable, UNSEATED};
pub use station::StationCode;
pub use ticket::Ticket;
pub use time::{FALLBACK_DURATION_HOURS, TimeError, arrival_after, parse_departure, parse_duration};
