//! Point debits, date ranges, and booking status rules.
//!
//! This module holds the pure half of the booking write path:
//! - Debit sufficiency checks (`check_debit`)
//! - Stay date validation and pricing (`DateRange`, `booking_total`)
//! - Status transition rules (`BookingStatus`)
//! - Error types for booking operations
//!
//! The atomic execution of a debit against the store lives in the db
//! crate; everything here is side-effect free.

pub mod debit;
pub mod error;
pub mod status;
pub mod types;

#[cfg(test)]
mod props;

pub use debit::{booking_total, check_debit};
pub use error::BookingError;
pub use status::BookingStatus;
pub use types::{DateRange, PaymentMethod};
