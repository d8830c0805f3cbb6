//! Rating average derivation.
//!
//! A property's `rating_avg` is a derived value: the mean of its current
//! rating rows, or zero when none exist. This module holds the pure
//! derivation; the db crate reads the rows and writes the result.

pub mod mean;
pub mod recompute;

#[cfg(test)]
mod props;

pub use mean::{DEFAULT_AVERAGE, mean_score};
pub use recompute::{RecomputeTargets, recompute_targets};
