//! Core business logic for Stayledger.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain rules, validation, and calculations live here.
//!
//! # Modules
//!
//! - `booking` - Point debits, date ranges, and booking status rules
//! - `rating` - Rating average derivation
//! - `auth` - Password hashing

pub mod auth;
pub mod booking;
pub mod rating;
