//! Repository abstractions for data access.
//!
//! Each repository owns a cloned `DatabaseConnection` handle and exposes
//! the operations for one aggregate. The two consistency-critical paths
//! live here: the atomic point debit in `booking` and the derived
//! average maintenance in `rating`.

pub mod account;
pub mod booking;
pub mod property;
pub mod rating;

pub use account::AccountRepository;
pub use booking::BookingRepository;
pub use property::PropertyRepository;
pub use rating::RatingRepository;
