//! Rounding and clamping shared by the payment calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Months in a year; annual figures are spread over this many payments.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Rounds a value to cents, half-up (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use mortgage_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(416.665)), dec!(416.67));
/// assert_eq!(round_half_up(dec!(416.664)), dec!(416.66));
/// assert_eq!(round_half_up(dec!(-0.005)), dec!(-0.01));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value to zero from below.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Spreads an annual amount over twelve months, rounded to cents.
pub fn monthly_share(annual: Decimal) -> Decimal {
    round_half_up(annual / Decimal::from(MONTHS_PER_YEAR))
}
