//! Station code types.

use std::borrow::Borrow;
use std::fmt;

/// A station code as used by the upstream ticket query.
///
/// Canonical codes are 3 uppercase ASCII letters (e.g. `VAP`), but the
/// station registry is not validated on load, so a `StationCode` may hold
/// whatever the registry snapshot carried in its code column. Use
/// [`StationCode::is_canonical`] to test the shape.
///
/// # Examples
///
/// ```
/// use ticket_server::domain::StationCode;
///
/// assert!(StationCode::is_canonical("VAP"));
///
/// // Lowercase is not canonical
/// assert!(!StationCode::is_canonical("vap"));
///
/// // Wrong length is not canonical
/// assert!(!StationCode::is_canonical("VA"));
/// assert!(!StationCode::is_canonical("VAPX"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationCode(String);

impl StationCode {
    /// Wrap a code string without validation.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns true if `s` is exactly 3 uppercase ASCII letters (A-Z).
    pub fn is_canonical(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() == 3 && bytes.iter().all(u8::is_ascii_uppercase)
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StationCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any 3 uppercase letters are canonical
        #[test]
        fn uppercase_triples_canonical(s in "[A-Z]{3}") {
            prop_assert!(StationCode::is_canonical(&s));
        }

        /// Lowercase letters are never canonical
        #[test]
        fn lowercase_rejected(s in "[a-z]{3}") {
            prop_assert!(!StationCode::is_canonical(&s));
        }

        /// Wrong-length strings are never canonical
        #[test]
        fn wrong_length_rejected(s in "[A-Z]{0,2}|[A-Z]{4,10}") {
            prop_assert!(!StationCode::is_canonical(&s));
        }
    }
}
