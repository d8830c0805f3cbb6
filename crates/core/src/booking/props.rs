//! Property-based tests for the booking debit rules.

use proptest::prelude::*;
use stayledger_shared::Points;

use super::debit::{booking_total, check_debit};
use super::error::BookingError;

/// Strategy to generate point amounts in a realistic range.
fn point_amount() -> impl Strategy<Value = Points> {
    (0i64..10_000_000i64).prop_map(|n| Points::new(n).unwrap())
}

/// Strategy to generate a sequence of debit requests.
fn debit_sequence() -> impl Strategy<Value = Vec<Points>> {
    prop::collection::vec(point_amount(), 0..50)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A successful debit reduces the balance by exactly the requested
    /// amount; a failed one reports both sides and changes nothing.
    #[test]
    fn prop_debit_is_exact_or_rejected(
        balance in point_amount(),
        requested in point_amount(),
    ) {
        match check_debit(balance, requested) {
            Ok(remaining) => {
                prop_assert!(balance >= requested);
                prop_assert_eq!(remaining.get(), balance.get() - requested.get());
            }
            Err(BookingError::InsufficientBalance { balance: b, requested: r }) => {
                prop_assert!(balance < requested);
                prop_assert_eq!(b, balance);
                prop_assert_eq!(r, requested);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// For any sequence of debits applied in order, the balance never
    /// goes negative - failed debits leave it untouched.
    #[test]
    fn prop_balance_never_negative(
        start in point_amount(),
        debits in debit_sequence(),
    ) {
        let mut balance = start;
        let mut spent = 0i64;

        for requested in debits {
            if let Ok(remaining) = check_debit(balance, requested) {
                spent += requested.get();
                balance = remaining;
            }
        }

        prop_assert!(balance.get() >= 0);
        prop_assert_eq!(balance.get(), start.get() - spent);
    }

    /// Two serialized debits where the balance covers the first but not
    /// both: exactly one succeeds, in either arrival order.
    #[test]
    fn prop_contended_debits_one_winner(
        first in 1i64..1_000_000i64,
        second in 1i64..1_000_000i64,
    ) {
        let a = Points::new(first).unwrap();
        let b = Points::new(second).unwrap();
        // Balance fits either alone but not both together.
        let balance = Points::new(first.max(second)).unwrap();
        prop_assume!(first + second > balance.get());

        for (x, y) in [(a, b), (b, a)] {
            let mut successes = 0;
            let mut current = balance;
            for requested in [x, y] {
                if let Ok(remaining) = check_debit(current, requested) {
                    successes += 1;
                    current = remaining;
                }
            }
            prop_assert_eq!(successes, 1);
        }
    }

    /// Booking totals are exact multiples of the nightly price.
    #[test]
    fn prop_total_is_exact_multiple(
        price in 0i64..1_000_000i64,
        nights in 1i64..365i64,
    ) {
        let total = booking_total(Points::new(price).unwrap(), nights).unwrap();
        prop_assert_eq!(total.get(), price * nights);
    }
}
