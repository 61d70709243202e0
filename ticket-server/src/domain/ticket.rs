//! Ticket availability for one train.

use chrono::NaiveDateTime;

use super::SeatOffer;

/// Availability and fares for a single train between two stations.
///
/// Timestamps are local wall-clock values in the upstream's own timezone;
/// no conversion is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    /// Train number (e.g. "G123").
    pub train_number: String,

    /// Boarding station name. Empty if the registry has no entry for the code.
    pub from_station_name: String,

    /// Alighting station name. Empty if the registry has no entry for the code.
    pub to_station_name: String,

    /// Departure from the boarding station.
    pub departure: NaiveDateTime,

    /// Arrival at the alighting station.
    pub arrival: NaiveDateTime,

    /// Journey duration as upstream reports it ("H:MM").
    pub duration_text: String,

    /// Seat offers in upstream order.
    pub seat_offers: Vec<SeatOffer>,
}

impl Ticket {
    /// Total seats remaining across all classes.
    pub fn total_seats(&self) -> u32 {
        self.seat_offers.iter().map(|s| s.count).sum()
    }

    /// The cheapest offer with at least one seat left.
    pub fn cheapest_available(&self) -> Option<&SeatOffer> {
        self.seat_offers
            .iter()
            .filter(|s| s.count > 0)
            .min_by(|a, b| a.price.total_cmp(&b.price))
    }
}
