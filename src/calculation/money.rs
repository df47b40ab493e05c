//! Output rounding.
//!
//! Every monetary and hour figure that leaves the engine passes through
//! [`round_money`]. Intermediate products are never rounded.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places on every output figure.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds to 2 decimal places, half away from zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("2.345").unwrap()), Decimal::from_str("2.35").unwrap());
/// assert_eq!(round_money(Decimal::from_str("-2.345").unwrap()), Decimal::from_str("-2.35").unwrap());
/// assert_eq!(round_money(Decimal::from(600)).to_string(), "600.00");
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    // Pad to a fixed scale so outputs always carry two places ("600.00").
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round_money(dec("0.125")), dec("0.13"));
        assert_eq!(round_money(dec("0.135")), dec("0.14"));
        assert_eq!(round_money(dec("-0.125")), dec("-0.13"));
    }

    #[test]
    fn test_below_midpoint_rounds_down() {
        assert_eq!(round_money(dec("324.6425")), dec("324.64"));
    }

    #[test]
    fn test_whole_numbers_gain_two_places() {
        assert_eq!(round_money(dec("1600")).to_string(), "1600.00");
        assert_eq!(round_money(Decimal::ZERO).to_string(), "0.00");
    }

    #[test]
    fn test_long_fractions_collapse() {
        // 104 × 10/15
        let prorated = Decimal::from(104) * Decimal::from(10) / Decimal::from(15);
        assert_eq!(round_money(prorated), dec("69.33"));
    }
}
