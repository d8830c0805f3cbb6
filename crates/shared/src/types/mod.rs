//! Shared value types.

pub mod pagination;
pub mod points;

pub use pagination::{PageRequest, Paginated};
pub use points::Points;
