//! Departure and journey-duration handling.
//!
//! Upstream gives departure times as "HH:MM" on the query date and journey
//! durations as "H:MM" text. Arrival is derived by adding the duration to the
//! departure, so overnight trains roll onto the next calendar day naturally.

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Hours assumed when upstream duration text is unusable.
pub const FALLBACK_DURATION_HOURS: i64 = 3;

/// Error returned when parsing an invalid departure time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid departure time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Parse an "HH:MM" departure time on the given date.
///
/// # Examples
///
/// ```
/// use ticket_server::domain::parse_departure;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
/// let dep = parse_departure(date, "08:05").unwrap();
/// assert_eq!(dep.to_string(), "2026-10-20 08:05:00");
///
/// assert!(parse_departure(date, "25:00").is_err());
/// assert!(parse_departure(date, "0805").is_err());
/// ```
pub fn parse_departure(date: NaiveDate, hhmm: &str) -> Result<NaiveDateTime, TimeError> {
    let stamp = format!("{} {}:00", date.format("%Y-%m-%d"), hhmm);
    NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M:%S")
        .map_err(|_| TimeError::new(hhmm, "expected HH:MM"))
}

/// Parse "H:MM" duration text.
///
/// Returns `None` unless the text splits on `:` into exactly two numeric
/// parts. Minutes are not range-checked; "1:75" is 1h75m.
pub fn parse_duration(text: &str) -> Option<Duration> {
    let (hours, minutes) = text.split_once(':')?;
    if minutes.contains(':') {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    Some(Duration::hours(i64::from(hours)) + Duration::minutes(i64::from(minutes)))
}

/// Compute the arrival time from a departure and upstream duration text.
///
/// Unparseable duration text falls back to [`FALLBACK_DURATION_HOURS`]. Returns
/// `None` only if the result is outside the representable date range.
///
/// # Examples
///
/// ```
/// use ticket_server::domain::{arrival_after, parse_departure};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
/// let dep = parse_departure(date, "22:00").unwrap();
///
/// // Crosses midnight
/// let arr = arrival_after(dep, "04:30").unwrap();
/// assert_eq!(arr.to_string(), "2026-10-21 02:30:00");
/// ```
pub fn arrival_after(departure: NaiveDateTime, duration_text: &str) -> Option<NaiveDateTime> {
    let duration =
        parse_duration(duration_text).unwrap_or(Duration::hours(FALLBACK_DURATION_HOURS));
    departure.checked_add_signed(duration)
}
