//! Point balance type with exact integer arithmetic.
//!
//! Points are whole, non-negative units. Every arithmetic operation is
//! checked: a debit that would go below zero returns `None` rather than
//! wrapping or panicking.

use serde::{Deserialize, Serialize};

/// A non-negative point amount.
///
/// Wraps `i64` (matching the `bigint` column type) and guarantees the
/// value is never negative once constructed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Points(i64);

impl Points {
    /// Zero points.
    pub const ZERO: Self = Self(0);

    /// Creates a point amount, rejecting negative values.
    #[must_use]
    pub const fn new(amount: i64) -> Option<Self> {
        if amount >= 0 { Some(Self(amount)) } else { None }
    }

    /// Returns the raw amount.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Checked debit. Returns the remaining balance, or `None` if the
    /// debit would make the balance negative.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        if self.0 >= other.0 {
            Some(Self(self.0 - other.0))
        } else {
            None
        }
    }

    /// Checked credit. Returns `None` on `i64` overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Self(sum)),
            None => None,
        }
    }
}

impl std::fmt::Display for Points {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Points {
    type Error = String;

    fn try_from(amount: i64) -> Result<Self, Self::Error> {
        Self::new(amount).ok_or_else(|| format!("point amount cannot be negative: {amount}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_rejects_negative() {
        assert_eq!(Points::new(-1), None);
        assert_eq!(Points::new(0), Some(Points::ZERO));
        assert_eq!(Points::new(100).map(Points::get), Some(100));
    }

    #[rstest]
    #[case(100, 60, Some(40))]
    #[case(100, 100, Some(0))]
    #[case(40, 50, None)]
    #[case(0, 1, None)]
    fn test_checked_sub(#[case] balance: i64, #[case] debit: i64, #[case] expected: Option<i64>) {
        let balance = Points::new(balance).unwrap();
        let debit = Points::new(debit).unwrap();
        assert_eq!(balance.checked_sub(debit).map(Points::get), expected);
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Points::new(i64::MAX).unwrap();
        let one = Points::new(1).unwrap();
        assert_eq!(max.checked_add(one), None);
        assert_eq!(
            Points::ZERO.checked_add(one).map(Points::get),
            Some(1)
        );
    }

    #[test]
    fn test_try_from() {
        assert!(Points::try_from(10).is_ok());
        assert!(Points::try_from(-10).is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let p = Points::new(42).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "42");
        let back: Points = serde_json::from_str("42").unwrap();
        assert_eq!(back, p);
    }
}
