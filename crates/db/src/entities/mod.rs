//! `SeaORM` entity definitions.

pub mod accounts;
pub mod bookings;
pub mod facilities;
pub mod properties;
pub mod property_facilities;
pub mod ratings;
pub mod sea_orm_active_enums;
