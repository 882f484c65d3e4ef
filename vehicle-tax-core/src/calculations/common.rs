//! Common utility functions for bracket calculations and their display.
//!
//! Totals are never rounded by the calculator itself. Rounding only happens
//! when a value is turned into text for a step.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to `dp` decimal places using half-up rounding.
///
/// Values exactly halfway between two representable results are rounded away
/// from zero, matching how currency amounts are usually displayed.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use vehicle_tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2.345), 2), dec!(2.35));
/// assert_eq!(round_half_up(dec!(55.5), 0), dec!(56));
/// assert_eq!(round_half_up(dec!(-0.125), 2), dec!(-0.13)); // Away from zero
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds `value` half-up and pads it so it always carries exactly `dp`
/// decimal places (`0.03` at 3 places becomes `0.030`).
pub fn to_fixed(
    value: Decimal,
    dp: u32,
) -> Decimal {
    let mut fixed = round_half_up(value, dp);
    fixed.rescale(dp);
    fixed
}

/// Returns the maximum of two decimal values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use vehicle_tax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(-20), dec!(10)), dec!(10));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Returns the minimum of two decimal values.
pub fn min(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a < b { a } else { b }
}
