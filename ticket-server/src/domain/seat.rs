//! Seat classes and fare offers.

/// Display label for standing / no-seat tickets.
pub const UNSEATED: &str = "无座";

/// Upstream one-character seat-type codes and their display labels.
const SEAT_TYPES: &[(char, &str)] = &[
    ('A', "高级动卧"),
    ('B', "混编硬座"),
    ('C', "混编硬卧"),
    ('D', "优选一等座"),
    ('E', "特等软座"),
    ('F', "动卧"),
    ('G', "二人软包"),
    ('H', "一人软包"),
    ('I', "一等卧"),
    ('J', "二等卧"),
    ('K', "混编软座"),
    ('L', "混编软卧"),
    ('M', "一等座"),
    ('O', "二等座"),
    ('P', "特等座"),
    ('Q', "多功能座"),
    ('S', "二等包座"),
    ('W', UNSEATED),
    ('0', "棚车"),
    ('1', "硬座"),
    ('2', "软座"),
    ('3', "硬卧"),
    ('4', "软卧"),
    ('5', "包厢硬卧"),
    ('6', "高级软卧"),
    ('7', "一等软座"),
    ('8', "二等软座"),
    ('9', "商务座"),
];

/// Static lookup from seat-type code to display label.
///
/// Note that the fare segment decoder does not consult the `'3'` entry:
/// upstream reuses that code in the fare field as a no-seat marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeatTypeTable;

impl SeatTypeTable {
    /// Look up the label for a seat-type code.
    pub fn label(code: char) -> Option<&'static str> {
        SEAT_TYPES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| *label)
    }

    /// Number of known seat types.
    pub fn len() -> usize {
        SEAT_TYPES.len()
    }
}

/// One seat class offered on a train, with its remaining count and fare.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatOffer {
    /// Display label of the seat class (e.g. "二等座").
    pub seat_class: String,

    /// Number of seats remaining.
    pub count: u32,

    /// Fare in yuan.
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_labels() {
        assert_eq!(SeatTypeTable::label('1'), Some("硬座"));
        assert_eq!(SeatTypeTable::label('9'), Some("商务座"));
        assert_eq!(SeatTypeTable::label('O'), Some("二等座"));
        assert_eq!(SeatTypeTable::label('M'), Some("一等座"));
    }

    #[test]
    fn three_keeps_its_table_entry() {
        // The table still carries the sleeper label for other contexts
        assert_eq!(SeatTypeTable::label('3'), Some("硬卧"));
    }

    #[test]
    fn unknown_code() {
        assert_eq!(SeatTypeTable::label('Z'), None);
        assert_eq!(SeatTypeTable::label('x'), None);
    }

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<char> = SEAT_TYPES.iter().map(|(c, _)| *c).collect();
        assert_eq!(codes.len(), SeatTypeTable::len());
    }
}
