//! Property-based tests for rating aggregation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::mean::{DEFAULT_AVERAGE, mean_score};

/// Strategy for rating scores as the API bounds them.
fn score() -> impl Strategy<Value = i16> {
    1i16..=5
}

/// Strategy for a set of rating rows.
fn scores() -> impl Strategy<Value = Vec<i16>> {
    prop::collection::vec(score(), 0..100)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Recomputing over unchanged rows is idempotent.
    #[test]
    fn prop_recompute_idempotent(rows in scores()) {
        prop_assert_eq!(mean_score(&rows), mean_score(&rows));
    }

    /// The mean only depends on the row set, not on mutation order.
    #[test]
    fn prop_order_independent(mut rows in scores()) {
        let forward = mean_score(&rows);
        rows.reverse();
        prop_assert_eq!(mean_score(&rows), forward);
    }

    /// The mean is bounded by the extremes of its inputs, and empty
    /// inputs produce the defined default rather than a stale value.
    #[test]
    fn prop_mean_within_bounds(rows in scores()) {
        let avg = mean_score(&rows);
        if rows.is_empty() {
            prop_assert_eq!(avg, DEFAULT_AVERAGE);
        } else {
            let min = Decimal::from(*rows.iter().min().unwrap());
            let max = Decimal::from(*rows.iter().max().unwrap());
            prop_assert!(avg >= min && avg <= max);
        }
    }

    /// Any create/update/delete sequence converges to the mean of the
    /// rows that survive - the aggregate carries no history.
    #[test]
    fn prop_converges_after_mutations(
        ops in prop::collection::vec((0u8..3, score(), any::<prop::sample::Index>()), 0..60),
    ) {
        let mut rows: Vec<i16> = Vec::new();
        for (op, value, index) in ops {
            match op {
                0 => rows.push(value),
                1 if !rows.is_empty() => {
                    let i = index.index(rows.len());
                    rows[i] = value;
                }
                2 if !rows.is_empty() => {
                    let i = index.index(rows.len());
                    rows.remove(i);
                }
                _ => {}
            }
            // Recompute after every mutation; each run only sees the
            // current rows, so the final value matches a single fresh
            // derivation.
            let _ = mean_score(&rows);
        }
        prop_assert_eq!(mean_score(&rows), mean_score(&rows.clone()));
        if rows.is_empty() {
            prop_assert_eq!(mean_score(&rows), DEFAULT_AVERAGE);
        }
    }
}
