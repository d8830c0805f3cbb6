//! Mean score computation.

use rust_decimal::{Decimal, RoundingStrategy};

/// The aggregate value for a property with no ratings.
///
/// Zero rather than null, so the column never goes stale or undefined.
pub const DEFAULT_AVERAGE: Decimal = Decimal::ZERO;

/// Computes the mean of the given scores, rounded to 2 decimal places
/// with banker's rounding (round half to even).
///
/// Always derives from the full set of current rows, never from a
/// delta, so repeated calls over the same rows agree exactly: the
/// computation is idempotent and order-independent.
///
/// Returns [`DEFAULT_AVERAGE`] for an empty slice.
#[must_use]
pub fn mean_score(scores: &[i16]) -> Decimal {
    if scores.is_empty() {
        return DEFAULT_AVERAGE;
    }

    let sum: Decimal = scores.iter().map(|&s| Decimal::from(s)).sum();
    let count = Decimal::from(scores.len());

    (sum / count).round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(mean_score(&[]), DEFAULT_AVERAGE);
        assert_eq!(mean_score(&[]), dec!(0));
    }

    #[test]
    fn test_single_score() {
        assert_eq!(mean_score(&[4]), dec!(4));
    }

    #[test]
    fn test_delete_shrinks_the_set() {
        // Ratings 4 and 5 average to 4.5; deleting the 4 leaves 5.
        assert_eq!(mean_score(&[4, 5]), dec!(4.5));
        assert_eq!(mean_score(&[5]), dec!(5));
    }

    #[test]
    fn test_repeating_fraction_rounds() {
        // (5 + 4 + 4) / 3 = 4.333... -> 4.33
        assert_eq!(mean_score(&[5, 4, 4]), dec!(4.33));
        // (5 + 5 + 4) / 3 = 4.666... -> 4.67
        assert_eq!(mean_score(&[5, 5, 4]), dec!(4.67));
    }

    #[test]
    fn test_order_does_not_matter() {
        assert_eq!(mean_score(&[1, 3, 5]), mean_score(&[5, 1, 3]));
    }
}
