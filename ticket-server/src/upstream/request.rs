//! Ticket query request construction.

use chrono::NaiveDate;

use crate::domain::StationCode;

/// Passenger type sent with every query.
const PURPOSE_CODES: &str = "ADULT";

/// A resolved ticket query: both endpoints as codes plus the travel date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRequest {
    /// Travel date.
    pub date: NaiveDate,
    /// Boarding station code.
    pub from: StationCode,
    /// Alighting station code.
    pub to: StationCode,
}

impl TicketRequest {
    /// Create a new request.
    pub fn new(date: NaiveDate, from: StationCode, to: StationCode) -> Self {
        Self { date, from, to }
    }

    /// The query string, with parameters in the fixed order upstream expects.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use ticket_server::domain::StationCode;
    /// use ticket_server::upstream::TicketRequest;
    ///
    /// let request = TicketRequest::new(
    ///     NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
    ///     StationCode::new("VAP"),
    ///     StationCode::new("WHN"),
    /// );
    /// assert_eq!(
    ///     request.query_string(),
    ///     "leftTicketDTO.train_date=2026-10-20&leftTicketDTO.from_station=VAP\
    ///      &leftTicketDTO.to_station=WHN&purpose_codes=ADULT"
    /// );
    /// ```
    pub fn query_string(&self) -> String {
        format!(
            "leftTicketDTO.train_date={}&leftTicketDTO.from_station={}&leftTicketDTO.to_station={}&purpose_codes={}",
            self.date.format("%Y-%m-%d"),
            self.from,
            self.to,
            PURPOSE_CODES,
        )
    }

    /// Full request URL against the given endpoint.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}?{}", endpoint, self.query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TicketRequest {
        TicketRequest::new(
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            StationCode::new("VAP"),
            StationCode::new("WHN"),
        )
    }

    #[test]
    fn parameter_order_is_fixed() {
        let query = request().query_string();
        let keys: Vec<&str> = query
            .split('&')
            .map(|pair| pair.split_once('=').unwrap().0)
            .collect();
        assert_eq!(
            keys,
            vec![
                "leftTicketDTO.train_date",
                "leftTicketDTO.from_station",
                "leftTicketDTO.to_station",
                "purpose_codes",
            ]
        );
    }

    #[test]
    fn date_is_zero_padded() {
        assert!(
            request()
                .query_string()
                .starts_with("leftTicketDTO.train_date=2026-01-05&")
        );
    }

    #[test]
    fn url_joins_endpoint() {
        let url = request().url("https://example.com/otn/leftTicket/queryG");
        assert_eq!(
            url,
            "https://example.com/otn/leftTicket/queryG?leftTicketDTO.train_date=2026-01-05\
             &leftTicketDTO.from_station=VAP&leftTicketDTO.to_station=WHN&purpose_codes=ADULT"
        );
    }
}
