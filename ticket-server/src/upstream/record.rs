//! Decoding of upstream per-train records into domain types.
//!
//! Each train arrives as one `|`-delimited string of at least 40 positional
//! fields. All knowledge of those positions lives in this module.

use chrono::NaiveDate;

use crate::domain::{
    SeatOffer, SeatTypeTable, Ticket, TimeError, UNSEATED, arrival_after, parse_departure,
};
use crate::stations::StationRegistry;

/// Field separator within a record.
const FIELD_SEPARATOR: char = '|';

/// Minimum number of fields in a well-formed record.
pub const MIN_FIELDS: usize = 40;

const TRAIN_NUMBER: usize = 3;
const FROM_STATION_CODE: usize = 6;
const TO_STATION_CODE: usize = 7;
const DEPARTURE_TIME: usize = 8;
const DURATION: usize = 10;
const SEAT_INFO: usize = 39;

/// Width of one seat/price segment in the seat-info field.
const SEGMENT_LEN: usize = 10;

/// Seat-type code that marks a no-seat offer in the seat-info field.
const NO_SEAT_MARKER: char = '3';

/// Error decoding a single record.
///
/// Never fatal to a query: the record is skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// The record is not a string
    #[error("record is not a string")]
    NotText,

    /// Too few `|`-separated fields
    #[error("record has {found} fields, expected at least {expected}")]
    TooFewFields { found: usize, expected: usize },

    /// Departure field is not HH:MM
    #[error(transparent)]
    Departure(#[from] TimeError),

    /// Departure plus duration is not a representable time
    #[error("arrival time out of range")]
    ArrivalOutOfRange,
}

/// Decode one raw record into a [`Ticket`].
///
/// Station codes missing from `registry` decode to empty names rather than
/// failing, since registry snapshots may lag upstream.
pub fn decode_record(
    raw: &str,
    date: NaiveDate,
    registry: &StationRegistry,
) -> Result<Ticket, RecordError> {
    let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    if fields.len() < MIN_FIELDS {
        return Err(RecordError::TooFewFields {
            found: fields.len(),
            expected: MIN_FIELDS,
        });
    }

    let departure = parse_departure(date, fields[DEPARTURE_TIME])?;
    let duration_text = fields[DURATION];
    let arrival =
        arrival_after(departure, duration_text).ok_or(RecordError::ArrivalOutOfRange)?;

    let station_name = |code: &str| registry.name_of(code).unwrap_or_default().to_string();

    Ok(Ticket {
        train_number: fields[TRAIN_NUMBER].to_string(),
        from_station_name: station_name(fields[FROM_STATION_CODE]),
        to_station_name: station_name(fields[TO_STATION_CODE]),
        departure,
        arrival,
        duration_text: duration_text.to_string(),
        seat_offers: decode_seat_offers(fields[SEAT_INFO]),
    })
}

/// Decode the seat-info field into seat offers.
///
/// The field is a run of fixed 10-character segments with no separator; a
/// trailing partial segment is ignored. Within a segment:
///
/// | chars | meaning |
/// |---|---|
/// | 0 | seat-type code |
/// | 1-4 | fare, integer part |
/// | 5 | fare, tenths |
/// | 6 | unused |
/// | 7.. | seats remaining |
///
/// # Examples
///
/// ```
/// use ticket_server::upstream::decode_seat_offers;
///
/// let offers = decode_seat_offers("1025030080O0553000213");
/// assert_eq!(offers.len(), 2);
/// assert_eq!(offers[0].seat_class, "硬座");
/// assert_eq!(offers[0].price, 250.3);
/// assert_eq!(offers[0].count, 80);
/// ```
pub fn decode_seat_offers(field: &str) -> Vec<SeatOffer> {
    let chars: Vec<char> = field.chars().collect();
    chars.chunks_exact(SEGMENT_LEN).map(decode_segment).collect()
}

fn decode_segment(segment: &[char]) -> SeatOffer {
    let price_text: String = segment[1..5]
        .iter()
        .chain(std::iter::once(&'.'))
        .chain(&segment[5..6])
        .collect();
    let count_text: String = segment[7..].iter().collect();

    SeatOffer {
        seat_class: seat_class(segment[0]).to_string(),
        count: count_text.parse().unwrap_or(0),
        price: price_text.parse().unwrap_or(0.0),
    }
}

/// Seat class for a segment's type code.
///
/// The no-seat marker bypasses the table, whose entry for the same code
/// means something else. Unknown codes are also treated as no-seat.
fn seat_class(code: char) -> &'static str {
    if code == NO_SEAT_MARKER {
        return UNSEATED;
    }
    SeatTypeTable::label(code).unwrap_or(UNSEATED)
}
