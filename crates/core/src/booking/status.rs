//! Booking status lifecycle rules.

use serde::{Deserialize, Serialize};

use super::error::BookingError;

/// Lifecycle status of a booking.
///
/// `pending -> confirmed -> completed` is the happy path; `cancelled` is
/// reachable from either non-terminal state. Terminal statuses never
/// change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created and paid, awaiting owner confirmation.
    Pending,
    /// Confirmed by the property owner.
    Confirmed,
    /// Cancelled before completion.
    Cancelled,
    /// Stay finished.
    Completed,
}

impl BookingStatus {
    /// Returns true if no further transitions are allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Validates a status transition.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidStatusTransition` when the move is
    /// not allowed.
    pub const fn transition_to(self, to: Self) -> Result<(), BookingError> {
        let allowed = matches!(
            (self, to),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Completed | Self::Cancelled)
        );
        if allowed {
            Ok(())
        } else {
            Err(BookingError::InvalidStatusTransition { from: self, to })
        }
    }

    /// Stable string form used in the database and API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("unknown booking status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BookingStatus::Pending, BookingStatus::Confirmed, true)]
    #[case(BookingStatus::Pending, BookingStatus::Cancelled, true)]
    #[case(BookingStatus::Pending, BookingStatus::Completed, false)]
    #[case(BookingStatus::Confirmed, BookingStatus::Completed, true)]
    #[case(BookingStatus::Confirmed, BookingStatus::Cancelled, true)]
    #[case(BookingStatus::Confirmed, BookingStatus::Pending, false)]
    #[case(BookingStatus::Cancelled, BookingStatus::Confirmed, false)]
    #[case(BookingStatus::Completed, BookingStatus::Cancelled, false)]
    fn test_transitions(
        #[case] from: BookingStatus,
        #[case] to: BookingStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.transition_to(to).is_ok(), allowed);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
    }

    #[test]
    fn test_round_trip_strings() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("posted".parse::<BookingStatus>().is_err());
    }
}
