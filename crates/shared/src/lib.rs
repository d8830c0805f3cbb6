//! Shared types, errors, and configuration for Stayledger.
//!
//! This crate provides common types used across all other crates:
//! - `Points` balance type with exact integer arithmetic
//! - Pagination types for list endpoints
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::points::Points;
