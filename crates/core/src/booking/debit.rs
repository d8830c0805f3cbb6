//! Debit sufficiency checks.
//!
//! These functions decide whether a debit is allowed and what the balance
//! becomes; they never touch the store. The db layer runs them against a
//! row-locked balance so that the decision and the write are atomic.

use stayledger_shared::Points;

use super::error::BookingError;

/// Checks that `balance` covers `requested` and returns the post-debit
/// balance.
///
/// This is the invariant gate for the account balance: no other code
/// path may reduce a balance, so a `points >= 0` account stays
/// non-negative for every sequence of debits that pass this check.
///
/// # Errors
///
/// Returns `BookingError::InsufficientBalance` (carrying both the
/// current balance and the requested amount) when the debit does not
/// fit. The balance is untouched in that case.
pub fn check_debit(balance: Points, requested: Points) -> Result<Points, BookingError> {
    balance
        .checked_sub(requested)
        .ok_or(BookingError::InsufficientBalance { balance, requested })
}

/// Computes the total price of a stay: `price_per_night * nights`.
///
/// # Errors
///
/// Returns `BookingError::TotalOutOfRange` if the multiplication
/// overflows or `nights` is not positive.
pub fn booking_total(price_per_night: Points, nights: i64) -> Result<Points, BookingError> {
    if nights <= 0 {
        return Err(BookingError::TotalOutOfRange);
    }
    price_per_night
        .get()
        .checked_mul(nights)
        .and_then(Points::new)
        .ok_or(BookingError::TotalOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: i64) -> Points {
        Points::new(n).unwrap()
    }

    #[test]
    fn test_sufficient_balance_debits_exactly() {
        assert_eq!(check_debit(points(100), points(60)), Ok(points(40)));
    }

    #[test]
    fn test_exact_balance_goes_to_zero() {
        assert_eq!(check_debit(points(100), points(100)), Ok(points(0)));
    }

    #[test]
    fn test_insufficient_balance_carries_both_sides() {
        let result = check_debit(points(40), points(50));
        assert_eq!(
            result,
            Err(BookingError::InsufficientBalance {
                balance: points(40),
                requested: points(50),
            })
        );
    }

    #[test]
    fn test_sequential_debits_stop_at_zero_headroom() {
        // 100 - 60 succeeds leaving 40; 50 then fails and leaves 40.
        let after_first = check_debit(points(100), points(60)).unwrap();
        assert_eq!(after_first, points(40));

        let second = check_debit(after_first, points(50));
        assert_eq!(
            second,
            Err(BookingError::InsufficientBalance {
                balance: points(40),
                requested: points(50),
            })
        );
    }

    #[test]
    fn test_booking_total() {
        assert_eq!(booking_total(points(20), 3), Ok(points(60)));
        assert_eq!(booking_total(points(20), 0), Err(BookingError::TotalOutOfRange));
        assert_eq!(
            booking_total(points(i64::MAX), 2),
            Err(BookingError::TotalOutOfRange)
        );
    }
}
