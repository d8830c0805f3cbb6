//! Booking error types for validation and state errors.

use chrono::NaiveDate;
use stayledger_shared::Points;
use thiserror::Error;

use super::status::BookingStatus;

/// Errors that can occur during booking operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    // ========== Balance Errors ==========
    /// The account balance does not cover the requested amount.
    ///
    /// Carries both sides so callers can build a user-facing message.
    #[error("Insufficient balance: have {balance}, requested {requested}")]
    InsufficientBalance {
        /// The account's current balance.
        balance: Points,
        /// The amount that was requested.
        requested: Points,
    },

    /// The booking total overflows the point range.
    #[error("Booking total out of range")]
    TotalOutOfRange,

    // ========== Validation Errors ==========
    /// The stay must end after it starts.
    #[error("Invalid date range: {start} to {end}")]
    InvalidDateRange {
        /// Requested check-in date.
        start: NaiveDate,
        /// Requested check-out date.
        end: NaiveDate,
    },

    // ========== State Errors ==========
    /// The requested status change is not allowed.
    #[error("Cannot transition booking from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status.
        from: BookingStatus,
        /// Requested status.
        to: BookingStatus,
    },
}
