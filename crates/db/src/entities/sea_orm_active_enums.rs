//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Booking lifecycle status, backed by the `booking_status` enum type.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_status")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created and paid, awaiting owner confirmation.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Confirmed by the property owner.
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Cancelled before completion.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    /// Stay finished.
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl From<stayledger_core::booking::BookingStatus> for BookingStatus {
    fn from(status: stayledger_core::booking::BookingStatus) -> Self {
        use stayledger_core::booking::BookingStatus as Core;
        match status {
            Core::Pending => Self::Pending,
            Core::Confirmed => Self::Confirmed,
            Core::Cancelled => Self::Cancelled,
            Core::Completed => Self::Completed,
        }
    }
}

impl From<BookingStatus> for stayledger_core::booking::BookingStatus {
    fn from(status: BookingStatus) -> Self {
        match status {
            BookingStatus::Pending => Self::Pending,
            BookingStatus::Confirmed => Self::Confirmed,
            BookingStatus::Cancelled => Self::Cancelled,
            BookingStatus::Completed => Self::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stayledger_core::booking::BookingStatus as Core;

    #[test]
    fn test_round_trip_with_core_status() {
        for core in [Core::Pending, Core::Confirmed, Core::Cancelled, Core::Completed] {
            let db: BookingStatus = core.into();
            let back: Core = db.into();
            assert_eq!(back, core);
        }
    }
}
