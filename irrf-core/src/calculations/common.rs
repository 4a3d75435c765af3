//! Small helpers shared by the bracket, rebate and scenario calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to the cent, midpoints away from zero.
///
/// The calculators keep exact values; this is only applied when a result is
/// presented (see [`crate::CalculationResult::rounded`]).
///
/// ```
/// use rust_decimal_macros::dec;
/// use irrf_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(401.359)), dec!(401.36));
/// assert_eq!(round_half_up(dec!(26.17926)), dec!(26.18));
/// assert_eq!(round_half_up(dec!(85.765)), dec!(85.77));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the larger of two amounts.
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the smaller of two amounts.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}

/// Clamps negative amounts to zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use irrf_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(-12.50)), dec!(0));
/// assert_eq!(floor_at_zero(dec!(12.50)), dec!(12.50));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(85.7649)), dec!(85.76));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(652.065)), dec!(652.07));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
    }

    #[test]
    fn round_half_up_preserves_cents() {
        assert_eq!(round_half_up(dec!(499.32)), dec!(499.32));
    }

    // =========================================================================
    // max / min tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(156.44), dec!(0)), dec!(156.44));
        assert_eq!(max(dec!(-3), dec!(0)), dec!(0));
    }

    #[test]
    fn min_returns_smaller_value() {
        assert_eq!(min(dec!(312.89), dec!(85.7649)), dec!(85.7649));
        assert_eq!(min(dec!(16754.34), dec!(20000)), dec!(16754.34));
    }

    #[test]
    fn min_and_max_handle_equal_values() {
        assert_eq!(min(dec!(10), dec!(10)), dec!(10));
        assert_eq!(max(dec!(10), dec!(10)), dec!(10));
    }

    // =========================================================================
    // floor_at_zero tests
    // =========================================================================

    #[test]
    fn floor_at_zero_keeps_zero() {
        assert_eq!(floor_at_zero(Decimal::ZERO), Decimal::ZERO);
    }
}
