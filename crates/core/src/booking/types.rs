//! Domain types for booking creation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::BookingError;

/// An inclusive check-in / exclusive check-out stay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Check-in date.
    pub start: NaiveDate,
    /// Check-out date. Must be strictly after `start`.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a date range, rejecting empty or reversed stays.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidDateRange` if `end <= start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BookingError> {
        if end <= start {
            return Err(BookingError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of nights in the stay. Always at least 1.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// How a booking is paid for.
///
/// Points are the only method today; the column is text so new methods
/// do not need a schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Paid from the account's point balance.
    #[default]
    Points,
}

impl PaymentMethod {
    /// Stable string form used in the database and API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Points => "points",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_range() {
        let range = DateRange::new(date(2026, 9, 1), date(2026, 9, 4)).unwrap();
        assert_eq!(range.nights(), 3);
    }

    #[test]
    fn test_single_night() {
        let range = DateRange::new(date(2026, 9, 1), date(2026, 9, 2)).unwrap();
        assert_eq!(range.nights(), 1);
    }

    #[test]
    fn test_rejects_zero_length_stay() {
        let result = DateRange::new(date(2026, 9, 1), date(2026, 9, 1));
        assert!(matches!(
            result,
            Err(BookingError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_rejects_reversed_range() {
        let result = DateRange::new(date(2026, 9, 4), date(2026, 9, 1));
        assert!(matches!(
            result,
            Err(BookingError::InvalidDateRange { .. })
        ));
    }
}
