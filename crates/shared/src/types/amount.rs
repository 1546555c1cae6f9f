//! Monetary amount helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`, rounded to 2 decimal
//! places with Banker's Rounding where a stored value is produced.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Tolerance under which a journal entry counts as balanced.
///
/// `abs(total_debit - total_credit)` must stay strictly below this
/// value for every posted entry; the same bound is enforced as a CHECK
/// constraint in the schema.
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Decimal places used for stored monetary values.
pub const MONEY_SCALE: u32 = 2;

/// Returns true if debit and credit totals agree within
/// [`BALANCE_TOLERANCE`].
#[must_use]
pub fn is_balanced(total_debit: Decimal, total_credit: Decimal) -> bool {
    (total_debit - total_credit).abs() < BALANCE_TOLERANCE
}

/// Rounds an amount to the stored money scale using Banker's Rounding.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tolerance_value() {
        assert_eq!(BALANCE_TOLERANCE, dec!(0.01));
    }

    #[rstest]
    #[case(dec!(100), dec!(100), true)]
    #[case(dec!(100.009), dec!(100), true)]
    #[case(dec!(100.01), dec!(100), false)]
    #[case(dec!(0), dec!(0), true)]
    #[case(dec!(99.99), dec!(100), false)]
    fn test_is_balanced(#[case] debit: Decimal, #[case] credit: Decimal, #[case] expected: bool) {
        assert_eq!(is_balanced(debit, credit), expected);
        // symmetry
        assert_eq!(is_balanced(credit, debit), expected);
    }

    #[test]
    fn test_round_money_bankers() {
        assert_eq!(round_money(dec!(2.345)), dec!(2.34));
        assert_eq!(round_money(dec!(2.355)), dec!(2.36));
        assert_eq!(round_money(dec!(2.3449)), dec!(2.34));
    }
}
